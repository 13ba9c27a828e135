//! Whitespace normalization, text-length measurement, and class/id regex
//! scoring. These are the only string-level operations the pipeline relies
//! on; everything else works on the DOM directly.

use crate::constants::REGEXPS;

/// Collapse whitespace around newlines into a single newline, collapse runs
/// of two-or-more spaces/tabs into a single space, and trim leading/trailing
/// whitespace.
///
/// Idempotent: `clean(clean(s)) == clean(s)` for all `s`.
///
/// ```
/// use readabilityrs::text::clean;
/// assert_eq!(clean("  a   b\n\n  c "), "a b\nc");
/// ```
pub fn clean(s: &str) -> String {
    let newlines_collapsed = REGEXPS.normalize_newlines.replace_all(s, "\n");
    let spaces_collapsed = REGEXPS.normalize_spaces.replace_all(&newlines_collapsed, " ");
    spaces_collapsed.trim().to_string()
}

/// Length of [`clean`]'s output for a piece of text.
pub fn text_length(s: &str) -> usize {
    clean(s).chars().count()
}

/// Class/id weight used to bias candidate scores.
///
/// Starting from zero, for each of `class` and `id` that is present and
/// non-empty: add `25 * count(positive matches)` and subtract
/// `35 * count(negative matches)`. Class and id contribute independently,
/// so an element can accumulate weight from both.
pub fn class_weight(class: Option<&str>, id: Option<&str>) -> f64 {
    let mut weight = 0.0;

    if let Some(class) = class {
        if !class.is_empty() {
            weight -= 35.0 * REGEXPS.negative.find_iter(class).count() as f64;
            weight += 25.0 * REGEXPS.positive.find_iter(class).count() as f64;
        }
    }

    if let Some(id) = id {
        if !id.is_empty() {
            weight -= 35.0 * REGEXPS.negative.find_iter(id).count() as f64;
            weight += 25.0 * REGEXPS.positive.find_iter(id).count() as f64;
        }
    }

    weight
}
