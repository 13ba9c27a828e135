//! Unlikely-candidate removal and the div→p normalization pass that runs
//! right after it.

use kuchikikiki::NodeRef;

use crate::constants::REGEXPS;
use crate::dom;

/// Remove elements whose class/id strongly suggest navigation, ads,
/// comments, or other chrome, unless a rescuing token is also present.
/// Also removes elements hidden via an inline `display:none` or
/// `visibility:hidden` style.
///
/// Collects every element to remove during the walk and detaches them
/// only afterward, since detaching mid-walk would invalidate the live
/// traversal.
pub fn remove_unlikely_candidates(root: &NodeRef) {
    let mut to_remove = Vec::new();

    for elem in dom::select(root, "*") {
        let tag = dom::tag_name(&elem).unwrap_or_default();
        if tag == "html" || tag == "body" {
            continue;
        }

        let class = dom::attr(&elem, "class").unwrap_or_default();
        let id = dom::attr(&elem, "id").unwrap_or_default();
        let class_and_id = format!("{class} {id}");

        if class_and_id.len() >= 2
            && REGEXPS.unlikely_candidates.is_match(&class_and_id)
            && !REGEXPS.ok_maybe_its_a_candidate.is_match(&class_and_id)
        {
            to_remove.push(elem);
            continue;
        }

        if let Some(style) = dom::attr(&elem, "style") {
            if REGEXPS.negative_styles.is_match(&style) {
                to_remove.push(elem);
            }
        }
    }

    for elem in to_remove {
        dom::detach(&elem);
    }
}

/// Retag misused `<div>`s as `<p>`, then split each remaining `<div>`'s
/// loose text (leading text and any child's trailing tail text) into its
/// own `<p>` siblings, and drop stray `<br>` children.
pub fn transform_misused_divs_into_paragraphs(root: &NodeRef) {
    let divs = dom::select(root, "div");
    for div in divs {
        if !div_contains_block_html(&div) {
            dom::rename_to_p(&div);
        }
    }

    // Re-select: some divs above were just renamed to <p> and no longer
    // match; the rest still need the text/tail splitting pass.
    for div in dom::select(root, "div") {
        split_loose_text(&div);
        for br in dom::element_children(&div).into_iter().filter(|c| dom::is_tag(c, "br")) {
            dom::detach(&br);
        }
    }
}

/// True if serializing `div`'s direct children would contain a tag from
/// `divToPElements` — i.e. the div is a genuine block container, not a
/// misused paragraph wrapper.
fn div_contains_block_html(div: &NodeRef) -> bool {
    let mut html = String::new();
    for child in div.children() {
        html.push_str(&dom::serialize(&child));
    }
    REGEXPS.div_to_p_elements.is_match(&html)
}

/// Wrap a div's leading text (the text before its first child) in a new
/// `<p>` inserted as the first child, and wrap each child's trailing tail
/// text in a `<p>` inserted right after that child.
fn split_loose_text(div: &NodeRef) {
    let children: Vec<NodeRef> = div.children().collect();

    let mut leading = String::new();
    let mut first_non_text_seen = false;
    for child in &children {
        if first_non_text_seen {
            break;
        }
        match child.as_text() {
            Some(text) => leading.push_str(&text.borrow()),
            None => first_non_text_seen = true,
        }
    }
    if !leading.trim().is_empty() {
        let p = dom::new_p();
        p.append(NodeRef::new_text(leading));
        match div.first_child() {
            Some(first) => first.insert_before(p),
            None => div.append(p),
        }
    }

    for child in &children {
        if child.as_element().is_none() {
            continue;
        }
        let Some(tail) = following_text_run(child) else {
            continue;
        };
        if tail.trim().is_empty() {
            continue;
        }
        let p = dom::new_p();
        p.append(NodeRef::new_text(tail));
        child.insert_after(p);
    }
}

/// Concatenated text of the sibling text nodes immediately following
/// `node`, stopping at the next element sibling. This is the adapter's
/// analogue of the "tail text" a tree-based parser attaches to a node.
fn following_text_run(node: &NodeRef) -> Option<String> {
    let mut s = String::new();
    let mut found = false;
    let mut sib = node.next_sibling();
    while let Some(cur) = sib {
        match cur.as_text() {
            Some(text) => {
                s.push_str(&text.borrow());
                found = true;
                sib = cur.next_sibling();
            }
            None => break,
        }
    }
    if found {
        Some(s)
    } else {
        None
    }
}
