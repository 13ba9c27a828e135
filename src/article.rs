//! Best-candidate selection and article assembly: pick the top-scored
//! element, then gather its eligible siblings into an output container.

use kuchikikiki::NodeRef;

use crate::constants::REGEXPS;
use crate::dom;
use crate::scoring::CandidateStore;

/// Sort candidates descending by score and return the top one. No
/// promotion or common-ancestor heuristics: ties and near-ties are left
/// to whatever order the store happens to hold, since only the winner is
/// observable.
pub fn select_best_candidate(store: &CandidateStore) -> Option<NodeRef> {
    store
        .iter()
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
        .map(|c| c.node.clone())
}

/// Build the output subtree from `best` and its eligible siblings.
///
/// When `html_partial` is true, the returned node is a bare `<div>`
/// containing clones of the eligible siblings. When false, the returned
/// node is the `<div>` nested inside a synthetic `<html><body>` — callers
/// serialize the whole returned tree in that case.
pub fn build_article(best: &NodeRef, store: &CandidateStore, html_partial: bool) -> NodeRef {
    let best_score = store.score_of(best);
    let threshold = (best_score * 0.2).max(10.0);

    let output = dom::new_div();
    let root = if html_partial {
        output.clone()
    } else {
        wrap_in_document(output.clone())
    };

    let siblings: Vec<NodeRef> = match best.parent() {
        Some(parent) => dom::element_children(&parent),
        None => vec![best.clone()],
    };

    for sibling in &siblings {
        if sibling == best || is_eligible_sibling(sibling, store, threshold) {
            output.append(sibling.clone());
        }
    }

    root
}

fn is_eligible_sibling(sibling: &NodeRef, store: &CandidateStore, threshold: f64) -> bool {
    if let Some(candidate) = store.get(sibling) {
        if candidate.score >= threshold {
            return true;
        }
    }

    if !dom::is_tag(sibling, "p") {
        return false;
    }

    let text = dom::own_text(sibling);
    let density = dom::link_density(sibling);
    let len = text.chars().count();

    if len > 80 && density < 0.25 {
        return true;
    }
    if len <= 80 && density == 0.0 && REGEXPS.sentence_end.is_match(text.trim()) {
        return true;
    }

    false
}

/// Build `<html><body><div></div></body></html>` with `div` as the
/// document's inner div, matching the factory structure the reference
/// implementation's non-partial path assumes.
fn wrap_in_document(div: NodeRef) -> NodeRef {
    let html = dom::new_html();
    let body = dom::new_body();
    body.append(div);
    html.append(body);
    html
}

/// Reach the inner `<div>` of a tree built by [`wrap_in_document`]. This is
/// the address path the reference implementation hard-codes as
/// `output.getchildren()[0].getchildren()[0]`; it only holds because
/// `wrap_in_document` is the sole factory for non-partial trees.
pub fn inner_div(root: &NodeRef) -> NodeRef {
    dom::first_element_by_tag(root, "div").unwrap_or_else(|| root.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ParseFlags;
    use crate::dom::parse_document;
    use crate::scoring::score_paragraphs;

    #[test]
    fn picks_highest_scoring_candidate() {
        let doc = parse_document(
            "<html><body>\
             <div id=\"low\"><p>short one</p></div>\
             <div id=\"high\"><p>This paragraph is much longer and has several commas, clauses, and more commas, to push its score up.</p></div>\
             </body></html>",
        );
        let store = score_paragraphs(&doc, ParseFlags::default(), 5);
        let best = select_best_candidate(&store).unwrap();
        assert_eq!(dom::attr(&best, "id").as_deref(), Some("high"));
    }

    #[test]
    fn article_builder_keeps_best_and_rich_siblings() {
        let doc = parse_document(
            "<html><body><div id=\"root\">\
             <p>This sibling paragraph has more than eighty characters in it, well past the threshold for inclusion as prose.</p>\
             <p>tiny</p>\
             </div></body></html>",
        );
        let root = crate::dom::first_element_by_tag(&doc, "div").unwrap();
        let store = score_paragraphs(&doc, ParseFlags::default(), 5);
        let best = select_best_candidate(&store).unwrap_or(root);
        let article = build_article(&best, &store, true);
        assert!(!dom::select(&article, "p").is_empty());
    }
}
