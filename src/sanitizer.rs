//! Final pruning pass over the article subtree: unconditional drops of
//! bad headers/forms/frames, conditional cleaning of tables/lists/divs
//! with a sibling-rescue escape hatch, and removal of emptied-out
//! elements.

use kuchikikiki::NodeRef;

use crate::scoring::CandidateStore;
use crate::text;
use crate::{constants::REGEXPS, dom};

/// Run all three sanitizer steps over `article` in place.
pub fn sanitize(article: &NodeRef, candidates: &CandidateStore, min_text_length: usize) {
    drop_bad_headers(article);
    drop_unconditional_tags(article);
    clean_conditionally(article, candidates, min_text_length);
    drop_emptied_elements(article);
}

/// Every `h1`..`h6` with negative class weight or link density over a
/// third is dropped outright — these are near-always navigation dressed
/// up as a heading, not article structure.
fn drop_bad_headers(article: &NodeRef) {
    let mut to_remove = Vec::new();
    for tag in ["h1", "h2", "h3", "h4", "h5", "h6"] {
        for header in dom::select(article, tag) {
            let weight = text::class_weight(dom::attr(&header, "class").as_deref(), dom::attr(&header, "id").as_deref());
            if weight < 0.0 || dom::link_density(&header) > 0.33 {
                to_remove.push(header);
            }
        }
    }
    for node in to_remove {
        dom::detach(&node);
    }
}

fn drop_unconditional_tags(article: &NodeRef) {
    let mut to_remove = Vec::new();
    for tag in ["form", "iframe", "textarea"] {
        to_remove.extend(dom::select(article, tag));
    }
    for node in to_remove {
        dom::detach(&node);
    }
}

/// Conditionally clean `<table>`, `<ul>`, `<div>` in reverse document
/// order, with a sibling-rescue mechanism that can cancel a removal and
/// allow-list the rescued element (and any table/ul/div beneath it).
///
/// The reference implementation increments its sibling-rescue counters
/// with `i =+ 1` rather than `i += 1`, which is an assignment bug, not the
/// intended "look at one following and one preceding non-empty sibling"
/// behavior described in its own comments. This implementation follows
/// the evidently-intended behavior instead of the bug.
fn clean_conditionally(article: &NodeRef, candidates: &CandidateStore, min_text_length: usize) {
    let mut allowed: Vec<NodeRef> = Vec::new();

    let mut targets = Vec::new();
    for tag in ["table", "ul", "div"] {
        targets.extend(dom::select(article, tag));
    }
    // Reverse document order: later elements (which, for nested
    // table/ul/div, tend to be descendants) are decided first, so an
    // ancestor's sibling-rescue allow-listing of its own subtree doesn't
    // get immediately undone by a not-yet-visited ancestor decision.
    targets.reverse();

    for el in targets {
        if allowed.iter().any(|n| n == &el) {
            continue;
        }

        let tag = dom::tag_name(&el).unwrap_or_default();
        let weight = text::class_weight(dom::attr(&el, "class").as_deref(), dom::attr(&el, "id").as_deref());
        let content_score = candidates.score_of(&el);

        if weight + content_score < 0.0 {
            dom::detach(&el);
            continue;
        }

        let text_content = dom::text_content(&el);
        if REGEXPS.commas.find_iter(&text_content).count() >= 10 {
            continue;
        }

        let p = dom::count_children_matching(&el, "p");
        let img = dom::count_children_matching(&el, "img");
        let li = dom::count_children_matching(&el, "li").saturating_sub(100);
        let embed = dom::count_children_matching(&el, "embed");
        let input = dom::count_children_matching(&el, "input");

        let content_length = dom::text_length(&el);
        let link_density = dom::link_density(&el);

        let should_remove = if p > 0 && img > p {
            Some("too many images")
        } else if li > p && tag != "ul" && tag != "ol" {
            Some("more lists than paragraphs")
        } else if p > 0 && input as f64 > p as f64 / 3.0 {
            Some("too many inputs")
        } else if content_length < min_text_length && (img == 0 || img > 2) {
            Some("too short, no lone image")
        } else if weight < 25.0 && link_density > 0.2 {
            Some("too many links for weight")
        } else if weight >= 25.0 && link_density > 0.5 {
            Some("too many links for weight")
        } else if (embed == 1 && content_length < 75) || embed > 1 {
            Some("embed-heavy")
        } else {
            None
        };

        let Some(_reason) = should_remove else {
            continue;
        };

        if let Some(combined) = rescue_text_len(&el) {
            if combined > 1000 {
                allowed.push(el.clone());
                for tag in ["table", "ul", "div"] {
                    allowed.extend(dom::select(&el, tag));
                }
                continue;
            }
        }

        dom::detach(&el);
    }
}

/// Sum of text lengths of at most one non-empty following sibling and one
/// non-empty preceding sibling, or `None` if neither exists.
fn rescue_text_len(el: &NodeRef) -> Option<usize> {
    let mut total = 0usize;
    let mut found = false;

    if let Some(sib) = first_non_empty_sibling(el, true) {
        total += dom::text_length(&sib);
        found = true;
    }
    if let Some(sib) = first_non_empty_sibling(el, false) {
        total += dom::text_length(&sib);
        found = true;
    }

    found.then_some(total)
}

fn first_non_empty_sibling(el: &NodeRef, forward: bool) -> Option<NodeRef> {
    let mut cur = if forward { el.next_sibling() } else { el.previous_sibling() };
    while let Some(node) = cur {
        if node.as_element().is_some() && dom::text_length(&node) > 0 {
            return Some(node);
        }
        cur = if forward { node.next_sibling() } else { node.previous_sibling() };
    }
    None
}

/// Remove every element whose cleaned text content is empty, in reverse
/// document order so that emptying a parent by removing its last child
/// is visible before the parent itself is checked.
fn drop_emptied_elements(article: &NodeRef) {
    let mut all = dom::select(article, "*");
    all.reverse();
    for el in all {
        if dom::clean_text_content(&el).is_empty() {
            dom::detach(&el);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ParseFlags;
    use crate::dom::parse_document;
    use crate::scoring::score_paragraphs;

    #[test]
    fn drops_form_iframe_textarea() {
        let doc = parse_document(
            "<html><body><div><form></form><iframe></iframe><textarea></textarea><p>keep this paragraph content here</p></div></body></html>",
        );
        let store = score_paragraphs(&doc, ParseFlags::default(), 5);
        sanitize(&doc, &store, 25);
        assert!(dom::select(&doc, "form").is_empty());
        assert!(dom::select(&doc, "iframe").is_empty());
        assert!(dom::select(&doc, "textarea").is_empty());
    }

    #[test]
    fn link_only_list_is_removed() {
        let html = format!(
            "<html><body><div>{}<p>{}</p></div></body></html>",
            "<ul>".to_string()
                + &"<li><a href=\"http://x\">link</a></li>".repeat(12)
                + "</ul>",
            "x".repeat(500)
        );
        let doc = parse_document(&html);
        let store = score_paragraphs(&doc, ParseFlags::default(), 5);
        sanitize(&doc, &store, 25);
        assert!(dom::select(&doc, "ul").is_empty());
        assert!(!dom::select(&doc, "p").is_empty());
    }

    #[test]
    fn drops_empty_elements() {
        let doc = parse_document("<html><body><div><span></span><p>real content here, plenty of it</p></div></body></html>");
        let store = score_paragraphs(&doc, ParseFlags::default(), 5);
        sanitize(&doc, &store, 25);
        assert!(dom::select(&doc, "span").is_empty());
    }
}
