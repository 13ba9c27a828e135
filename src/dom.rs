//! A narrow abstraction over the mutable DOM collaborator
//! ([`kuchikikiki`]). This module carries no scoring or cleaning policy; it
//! only exposes the handful of primitives the rest of the pipeline needs:
//! tag/attribute access, text content, structural navigation, and the
//! three mutations (`detach`, `insert_at`, `replace_tag`) that move nodes
//! around.

use html5ever::{local_name, namespace_url, ns, QualName};
use kuchikikiki::{traits::TendrilSink, ElementData, NodeDataRef, NodeRef};

use crate::text;

/// Build a `<div>` element with no attributes and no children.
pub fn new_div() -> NodeRef {
    NodeRef::new_element(
        QualName {
            prefix: None,
            ns: ns!(html),
            local: local_name!("div"),
        },
        std::iter::empty(),
    )
}

/// Build a `<p>` element with no attributes and no children.
pub fn new_p() -> NodeRef {
    NodeRef::new_element(
        QualName {
            prefix: None,
            ns: ns!(html),
            local: local_name!("p"),
        },
        std::iter::empty(),
    )
}

/// Build an `<html>` element with no attributes and no children.
pub fn new_html() -> NodeRef {
    NodeRef::new_element(
        QualName {
            prefix: None,
            ns: ns!(html),
            local: local_name!("html"),
        },
        std::iter::empty(),
    )
}

/// Build a `<body>` element with no attributes and no children.
pub fn new_body() -> NodeRef {
    NodeRef::new_element(
        QualName {
            prefix: None,
            ns: ns!(html),
            local: local_name!("body"),
        },
        std::iter::empty(),
    )
}

/// Parse a complete HTML document into a mutable DOM.
pub fn parse_document(html: &str) -> NodeRef {
    kuchikikiki::parse_html().one(html)
}

/// Parse an HTML fragment; returns the implicit `<html>` root kuchikikiki
/// always produces, so callers typically want [`first_element_by_tag`] to
/// reach into it.
pub fn parse_fragment(html: &str) -> NodeRef {
    kuchikikiki::parse_html().one(html)
}

/// Lower-case tag name of an element node, or `None` for non-element nodes.
pub fn tag_name(node: &NodeRef) -> Option<String> {
    node.as_element().map(|e| e.name.local.to_string())
}

/// True if `node`'s tag name equals `name` (case-insensitive; tag names
/// are already lower-cased by the HTML parser, so this is a plain
/// comparison in practice).
pub fn is_tag(node: &NodeRef, name: &str) -> bool {
    tag_name(node).map(|t| t == name).unwrap_or(false)
}

/// Read an attribute's value from an element node.
pub fn attr(node: &NodeRef, name: &str) -> Option<String> {
    node.as_element()
        .and_then(|e| e.attributes.borrow().get(name).map(str::to_string))
}

/// Set (or overwrite) an attribute on an element node. No-op on non-element
/// nodes.
pub fn set_attr(node: &NodeRef, name: &str, value: impl Into<String>) {
    if let Some(elem) = node.as_element() {
        elem.attributes.borrow_mut().insert(name, value.into());
    }
}

/// Remove an attribute from an element node. No-op if absent.
pub fn remove_attr(node: &NodeRef, name: &str) {
    if let Some(elem) = node.as_element() {
        elem.attributes.borrow_mut().remove(name);
    }
}

/// Un-normalized text content of a node and its descendants.
pub fn text_content(node: &NodeRef) -> String {
    node.text_contents()
}

/// A node's own leading text, i.e. the text before its first child element
/// — the adapter's analogue of lxml's `.text` (as opposed to
/// [`text_content`], which recurses into descendants). Used by the article
/// builder's short-sibling heuristic, which judges a paragraph by its own
/// immediate text rather than text contributed by nested markup.
pub fn own_text(node: &NodeRef) -> String {
    let mut s = String::new();
    for child in node.children() {
        match child.as_text() {
            Some(text) => s.push_str(&text.borrow()),
            None => break,
        }
    }
    s
}

/// [`text::clean`]ed text content of a node and its descendants.
pub fn clean_text_content(node: &NodeRef) -> String {
    text::clean(&node.text_contents())
}

/// [`text::text_length`] of a node's text content.
pub fn text_length(node: &NodeRef) -> usize {
    text::text_length(&node.text_contents())
}

/// Direct element children of `node`, in document order.
pub fn element_children(node: &NodeRef) -> Vec<NodeRef> {
    node.children().filter(|c| c.as_element().is_some()).collect()
}

/// All descendant elements matching a CSS selector list, in document
/// order. Returns an empty vector if the selector fails to parse (which
/// only happens for a programmer error in a hard-coded selector string).
pub fn select(node: &NodeRef, selector: &str) -> Vec<NodeRef> {
    node.select(selector)
        .map(|iter| iter.map(|m: NodeDataRef<ElementData>| m.as_node().clone()).collect())
        .unwrap_or_default()
}

/// Direct-descendant count matching a simple tag selector.
pub fn count_children_matching(node: &NodeRef, tag: &str) -> usize {
    element_children(node)
        .iter()
        .filter(|c| is_tag(c, tag))
        .count()
}

/// Detach `node` (and its subtree) from the DOM. A no-op if already
/// detached; the candidate map and sanitizer both rely on being able to
/// call this repeatedly against stale references.
pub fn detach(node: &NodeRef) {
    node.detach();
}

/// Insert `new_child` as the child at `index` among `parent`'s current
/// element-and-non-element children. Used by the div→p transform to splice
/// synthetic `<p>` wrappers in around text runs.
pub fn insert_at(parent: &NodeRef, index: usize, new_child: NodeRef) {
    match parent.children().nth(index) {
        Some(existing) => existing.insert_before(new_child),
        None => parent.append(new_child),
    }
}

/// Replace an element's tag while preserving its attributes and children.
/// Used by the div→p transform when a `<div>` has no block-level children.
pub fn replace_tag(node: &NodeRef, new_tag: QualName) -> NodeRef {
    let Some(elem) = node.as_element() else {
        return node.clone();
    };

    let attributes = elem.attributes.borrow();
    let replacement = NodeRef::new_element(new_tag, attributes.map.clone());
    drop(attributes);

    for child in node.children() {
        replacement.append(child);
    }

    node.insert_before(replacement.clone());
    node.detach();
    replacement
}

/// Rename an element to `<p>`, preserving attributes and children.
pub fn rename_to_p(node: &NodeRef) -> NodeRef {
    replace_tag(
        node,
        QualName {
            prefix: None,
            ns: ns!(html),
            local: local_name!("p"),
        },
    )
}

/// Serialize a node (and its subtree) back to an HTML string. Falls back to
/// plain text content if serialization fails, which only happens on an
/// I/O error writing into the in-memory buffer and therefore never in
/// practice.
pub fn serialize(node: &NodeRef) -> String {
    let mut buffer = Vec::new();
    if node.serialize(&mut buffer).is_err() {
        return node.text_contents();
    }
    String::from_utf8(buffer).unwrap_or_else(|_| node.text_contents())
}

/// Serialize only `node`'s children (used for full-document output, where
/// the outer `<div>` wrapper itself is already part of the surrounding
/// document and need not be re-emitted).
pub fn serialize_children(node: &NodeRef) -> String {
    let mut buffer = Vec::new();
    for child in node.children() {
        if child.serialize(&mut buffer).is_err() {
            return node.text_contents();
        }
    }
    String::from_utf8(buffer).unwrap_or_else(|_| node.text_contents())
}

/// Fraction of `node`'s cleaned text length contributed by descendant
/// `<a>` elements.
pub fn link_density(node: &NodeRef) -> f64 {
    let total = text_length(node);
    if total == 0 {
        return 0.0;
    }

    let mut link_len = 0.0;
    for link in select(node, "a") {
        link_len += text_length(&link) as f64;
    }

    link_len / total as f64
}

/// True if any ancestor of `node` (not including itself) has a tag in
/// `tags`.
pub fn has_ancestor_tag(node: &NodeRef, tags: &[&str]) -> bool {
    node.ancestors()
        .any(|a| tag_name(&a).map(|t| tags.contains(&t.as_str())).unwrap_or(false))
}

/// The first descendant element (in document order) matching `tag`, or the
/// root itself if it matches.
pub fn first_element_by_tag(root: &NodeRef, tag: &str) -> Option<NodeRef> {
    if is_tag(root, tag) {
        return Some(root.clone());
    }
    select(root, tag).into_iter().next()
}
