//! Regular expressions, fixed enumerations, and parse flags shared across
//! the pipeline. Every regex here is compiled exactly once (via
//! [`once_cell::sync::Lazy`]) and is part of the crate's external contract:
//! the token lists are reproduced verbatim from the reference
//! implementation and must not drift.

use once_cell::sync::Lazy;
use regex::Regex;

bitflags::bitflags! {
    /// Flags controlling which pipeline stages the driver runs on a given
    /// pass. Unlike the reference implementation (which degrades through
    /// four flag combinations), this crate's driver only ever toggles
    /// [`ParseFlags::STRIP_UNLIKELYS`] between the ruthless and retry pass;
    /// `WEIGHT_CLASSES` and `CLEAN_CONDITIONALLY` stay enabled throughout,
    /// matching `summary()`'s two-attempt loop.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParseFlags: u32 {
        const STRIP_UNLIKELYS = 0x1;
        const WEIGHT_CLASSES = 0x2;
        const CLEAN_CONDITIONALLY = 0x4;
    }
}

impl Default for ParseFlags {
    fn default() -> Self {
        ParseFlags::STRIP_UNLIKELYS | ParseFlags::WEIGHT_CLASSES | ParseFlags::CLEAN_CONDITIONALLY
    }
}

/// Tags considered during candidate scoring.
pub const TAGS_TO_SCORE: &[&str] = &["p", "pre", "td"];

/// `<meta name="...">`/`<meta property="...">` values the meta collector
/// recognizes.
pub const META_PROPS: &[&str] = &[
    "description",
    "title",
    "keywords",
    "og:title",
    "og:description",
    "twitter:description",
    "twitter:title",
];

/// `[itemprop]` values the meta collector recognizes.
pub const ITEM_PROPS: &[&str] = &["model", "brand", "description", "name"];

/// Tags dropped unconditionally by the driver before every pass, and
/// checked by the meta collector's itemprop pass to exclude values nested
/// inside navigational chrome.
pub const BAD_TAGS: &[&str] = &["footer", "header", "nav", "aside", "script", "style"];

/// Compiled, process-wide regex set. Every pattern is case-insensitive and
/// the token lists are reproduced verbatim from the external contract.
pub static REGEXPS: Lazy<RegexPatterns> = Lazy::new(RegexPatterns::new);

pub struct RegexPatterns {
    /// Class/id tokens strongly associated with navigation, ads, comments,
    /// footers, legal notices, social chrome, and video players.
    pub unlikely_candidates: Regex,
    /// Class/id tokens that rescue an element that would otherwise match
    /// `unlikely_candidates`.
    pub ok_maybe_its_a_candidate: Regex,
    /// Tokens that add weight in [`crate::text::class_weight`].
    pub positive: Regex,
    /// Tokens that subtract weight in [`crate::text::class_weight`].
    pub negative: Regex,
    /// Tags whose presence inside a div's serialized children marks it as
    /// a real block container.
    pub div_to_p_elements: Regex,
    /// Inline `style` values that hide an element.
    pub negative_styles: Regex,
    /// Whitespace surrounding a newline, collapsed to a single newline by
    /// [`crate::text::clean`].
    pub normalize_newlines: Regex,
    /// Runs of two or more spaces/tabs, collapsed to a single space by
    /// [`crate::text::clean`].
    pub normalize_spaces: Regex,
    /// ASCII `,` characters counted when scoring paragraph content.
    pub commas: Regex,
    /// Matches a trailing sentence-ending period, used by the article
    /// builder's short-sibling heuristic.
    pub sentence_end: Regex,
    /// Strips embedded markup from meta-tag content.
    pub html_tag: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            unlikely_candidates: Regex::new(
                r"(?i)ad-break|agegate|cart|combx|comment|community|disclaimer|disqus|extra|foot|header|hidden|legal|menu|modal|nav|pager|pagination|polic|popup|reference|remark|review|rss|shoutbox|sidebar|slideshow|sponsor|toc|tweet|twitter|video|warranty",
            )
            .unwrap(),
            ok_maybe_its_a_candidate: Regex::new(
                r"(?i)econtextmax|and|article|body|column|content|main|shadow|product|feature|detail|spec|about|text|story",
            )
            .unwrap(),
            positive: Regex::new(
                r"(?i)econtextmax|and|article|body|column|content|main|shadow|product|feature|detail|spec|about|itemprop|text|story|story-content",
            )
            .unwrap(),
            negative: Regex::new(
                r"(?i)ad|ad-break|agegate|cart|citation|combx|comment|community|disclaimer|disqus|extra|feedback|foot|form|fulfillment|header|hidden|item|legal|menu|modal|nav|pager|pagination|placeholder|polic|popup|qa|question|reference|remark|return|review|rss|shoutbox|sidebar|slideshow|small|sponsor|toc|tweet|twitter|video|warranty",
            )
            .unwrap(),
            div_to_p_elements: Regex::new(r"(?i)<(a|article|blockquote|dl|div|img|ol|p|pre|table|ul|main)").unwrap(),
            negative_styles: Regex::new(r"(?i)display:.?none|visibility:.?hidden").unwrap(),
            normalize_newlines: Regex::new(r"\s*\n\s*").unwrap(),
            normalize_spaces: Regex::new(r"[ \t]{2,}").unwrap(),
            commas: Regex::new(",").unwrap(),
            sentence_end: Regex::new(r"\.( |$)").unwrap(),
            html_tag: Regex::new(r"<.*?>").unwrap(),
        }
    }
}
