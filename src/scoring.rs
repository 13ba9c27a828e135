//! The candidate scorer: walks paragraph-like elements, seeds scores on
//! their parents and grandparents, and scales the final tally by link
//! density.
//!
//! Candidates are keyed by element identity, never by structural shape —
//! two elements with identical tag/class/id are still distinct candidates.
//! [`kuchikikiki::NodeRef`] already compares by identity, so the store
//! below is a plain `Vec` scanned linearly rather than a `HashMap` keyed
//! on some derived, collidable shape.

use kuchikikiki::NodeRef;

use crate::constants::{ParseFlags, TAGS_TO_SCORE, REGEXPS};
use crate::dom;
use crate::text;

/// A scored element. `score` accumulates contributions from every scored
/// paragraph beneath it and is later scaled by `(1 - link_density)`.
pub struct Candidate {
    pub node: NodeRef,
    pub score: f64,
}

/// Insertion-ordered map from element identity to [`Candidate`]. Ordering
/// is retained because link-density scaling and best-candidate selection
/// both want a deterministic traversal, even though neither depends on it
/// for correctness.
#[derive(Default)]
pub struct CandidateStore {
    entries: Vec<Candidate>,
}

impl CandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: &NodeRef) -> Option<&Candidate> {
        self.entries.iter().find(|c| &c.node == node)
    }

    pub fn score_of(&self, node: &NodeRef) -> f64 {
        self.get(node).map(|c| c.score).unwrap_or(0.0)
    }

    /// Ensure `node` has an entry, seeding it with [`score_node`] if new,
    /// then add `delta` to its running score.
    fn add_score(&mut self, node: &NodeRef, delta: f64, flags: ParseFlags) {
        if let Some(entry) = self.entries.iter_mut().find(|c| &c.node == node) {
            entry.score += delta;
            return;
        }
        self.entries.push(Candidate {
            node: node.clone(),
            score: score_node(node, flags) + delta,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Candidate> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The seed score a freshly-discovered candidate element receives, before
/// any paragraph contributions. Based purely on tag type and class/id
/// weight.
pub fn score_node(node: &NodeRef, flags: ParseFlags) -> f64 {
    let mut score = if flags.contains(ParseFlags::WEIGHT_CLASSES) {
        text::class_weight(dom::attr(node, "class").as_deref(), dom::attr(node, "id").as_deref())
    } else {
        0.0
    };

    match dom::tag_name(node).as_deref() {
        Some("div") => score += 5.0,
        Some("pre") | Some("td") | Some("blockquote") => score += 3.0,
        Some("address") | Some("ol") | Some("ul") | Some("dl") | Some("dd") | Some("dt") | Some("li") | Some("form") => {
            score -= 3.0
        }
        Some("h1") | Some("h2") | Some("h3") | Some("h4") | Some("h5") | Some("h6") | Some("th") => score -= 5.0,
        _ => {}
    }

    score
}

/// Per-paragraph content score: `1 + comma_count + min(len/100, 3)`, all
/// before link-density scaling.
fn paragraph_content_score(inner_text: &str) -> f64 {
    let comma_count = REGEXPS.commas.find_iter(inner_text).count() as f64;
    let length_bonus = (inner_text.chars().count() as f64 / 100.0).min(3.0);
    1.0 + comma_count + length_bonus
}

/// Walk every `p`, `pre`, `td` descendant of `root` and build the
/// candidate map, scaling every entry by `(1 - link_density)` at the end.
pub fn score_paragraphs(root: &NodeRef, flags: ParseFlags, min_text_length: usize) -> CandidateStore {
    let mut store = CandidateStore::new();

    let mut scoreable = Vec::new();
    for tag in TAGS_TO_SCORE {
        scoreable.extend(dom::select(root, tag));
    }

    for elem in &scoreable {
        let Some(parent) = elem.parent() else {
            continue;
        };
        if parent.as_element().is_none() {
            continue;
        }

        let inner = text::clean(&dom::text_content(elem));
        if inner.chars().count() < min_text_length {
            continue;
        }

        let content_score = paragraph_content_score(&inner);

        store.add_score(&parent, content_score, flags);
        if let Some(grandparent) = parent.parent() {
            if grandparent.as_element().is_some() {
                store.add_score(&grandparent, content_score / 2.0, flags);
            }
        }
    }

    for candidate in store.iter_mut() {
        let density = dom::link_density(&candidate.node);
        candidate.score *= 1.0 - density;
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;

    #[test]
    fn scores_parent_and_grandparent() {
        let doc = parse_document(
            "<html><body><div><div><p>This is a paragraph with enough characters to be scored, really.</p></div></div></body></html>",
        );
        let store = score_paragraphs(&doc, ParseFlags::default(), 25);
        assert!(store.len() >= 2);
    }

    #[test]
    fn short_paragraphs_are_skipped() {
        let doc = parse_document("<html><body><div><p>short</p></div></body></html>");
        let store = score_paragraphs(&doc, ParseFlags::default(), 25);
        assert!(store.is_empty());
    }

    #[test]
    fn link_heavy_candidate_scores_lower() {
        let doc = parse_document(
            "<html><body><div id=\"a\"><p>Plain text that is long enough to score on its own merits, no links here at all.</p></div></body></html>",
        );
        let link_doc = parse_document(
            "<html><body><div id=\"b\"><p><a href=\"http://x\">Plain text that is long enough to score on its own merits, no links here at all.</a></p></div></body></html>",
        );
        let plain = score_paragraphs(&doc, ParseFlags::default(), 25);
        let linky = score_paragraphs(&link_doc, ParseFlags::default(), 25);

        let plain_div = crate::dom::first_element_by_tag(&doc, "div").unwrap();
        let linky_div = crate::dom::first_element_by_tag(&link_doc, "div").unwrap();

        assert!(plain.score_of(&plain_div) > linky.score_of(&linky_div));
    }
}
