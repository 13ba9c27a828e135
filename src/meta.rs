//! Scans a document for `<meta>` tags and `[itemprop]` elements in a fixed
//! set, normalizes their content, and emits a block of `<p>` elements meant
//! to be prepended to the final output body.

use std::collections::HashMap;

use crate::constants::{BAD_TAGS, ITEM_PROPS, META_PROPS, REGEXPS};
use crate::dom::{self, new_div, new_p};
use kuchikikiki::NodeRef;

/// Build the synthetic `<div id="meta product content descriptions">`
/// container holding normalized meta/itemprop values as `<p>` children.
///
/// `domain`, when present, is stripped case-insensitively from both ends
/// of every meta-tag's content before it is compared or inserted.
pub fn collect(document: &NodeRef, domain: Option<&str>) -> NodeRef {
    let container = new_div();
    dom::set_attr(&container, "id", "meta product content descriptions");

    let mut dedupe: HashMap<String, String> = HashMap::new();

    for meta in dom::select(document, "meta") {
        let prop = dom::attr(&meta, "name").or_else(|| dom::attr(&meta, "property"));
        let Some(prop) = prop else { continue };
        if !META_PROPS.contains(&prop.as_str()) {
            continue;
        }
        let Some(raw_content) = dom::attr(&meta, "content") else {
            continue;
        };

        let content = strip_domain(&raw_content, domain);
        let content = REGEXPS.html_tag.replace_all(&content, "").into_owned();

        let key = dedupe_key(&prop);
        if dedupe.get(&key).map(String::as_str) == Some(content.as_str()) {
            continue;
        }
        dedupe.insert(key, content.clone());

        let Some(p) = build_meta_paragraph("meta", &prop, &content) else {
            continue;
        };
        prepend(&container, p);
    }

    let mut itemprop_seen: HashMap<String, ()> = HashMap::new();
    for elem in dom::select(document, "[itemprop]") {
        let Some(name) = dom::attr(&elem, "itemprop") else {
            continue;
        };
        if !ITEM_PROPS.contains(&name.as_str()) {
            continue;
        }
        if dom::has_ancestor_tag(&elem, BAD_TAGS) {
            continue;
        }
        if itemprop_seen.contains_key(&name) {
            continue;
        }
        itemprop_seen.insert(name.clone(), ());

        let content = dom::attr(&elem, "content").unwrap_or_else(|| dom::clean_text_content(&elem));

        let Some(p) = build_meta_paragraph("itemprop", &name, &content) else {
            continue;
        };
        prepend(&container, p);
    }

    container
}

/// The dedupe key for a meta property: the substring after the first
/// `:` if any, else the whole property name. Two `<meta>` tags with the
/// same key and identical content collapse into one `<p>`.
fn dedupe_key(prop: &str) -> String {
    match prop.find(':') {
        Some(idx) => prop[idx + 1..].to_string(),
        None => prop.to_string(),
    }
}

fn strip_domain(content: &str, domain: Option<&str>) -> String {
    let Some(domain) = domain else {
        return content.to_string();
    };
    let domain = domain.trim();
    if domain.is_empty() {
        return content.trim().to_string();
    }

    let mut s = content.trim();
    let lower_s = s.to_lowercase();
    let lower_domain = domain.to_lowercase();

    if lower_s.starts_with(&lower_domain) {
        s = &s[domain.len()..];
    }
    let lower_s = s.to_lowercase();
    if lower_s.ends_with(&lower_domain) {
        s = &s[..s.len() - domain.len()];
    }

    s.trim().to_string()
}

/// Build `<p class="econtextmax {kind} {name}">{content}</p>`. Returns
/// `None` if `content` is empty after stripping — a malformed or empty
/// fragment should not poison the rest of the summary.
fn build_meta_paragraph(kind: &str, name: &str, content: &str) -> Option<NodeRef> {
    let content = content.trim();
    if content.is_empty() {
        return None;
    }

    let p = new_p();
    dom::set_attr(&p, "class", format!("econtextmax {kind} {name}"));
    p.append(NodeRef::new_text(content.to_string()));
    Some(p)
}

fn prepend(container: &NodeRef, node: NodeRef) {
    match container.first_child() {
        Some(first) => first.insert_before(node),
        None => container.append(node),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;

    fn children_text(container: &NodeRef) -> Vec<String> {
        dom::element_children(container)
            .iter()
            .map(dom::clean_text_content)
            .collect()
    }

    #[test]
    fn dedupes_identical_meta_content() {
        let doc = parse_document(
            r#"<html><head>
                <meta name="og:title" content="X">
                <meta property="og:title" content="X">
            </head><body></body></html>"#,
        );
        let container = collect(&doc, None);
        assert_eq!(children_text(&container).len(), 1);
    }

    #[test]
    fn keeps_differing_meta_content() {
        let doc = parse_document(
            r#"<html><head>
                <meta name="description" content="A">
                <meta name="twitter:description" content="B">
            </head><body></body></html>"#,
        );
        let container = collect(&doc, None);
        assert_eq!(children_text(&container).len(), 2);
    }

    #[test]
    fn strips_domain_prefix_and_suffix() {
        let doc = parse_document(
            r#"<html><head><meta name="description" content="amazon.com Foo"></head><body></body></html>"#,
        );
        let container = collect(&doc, Some("amazon.com "));
        assert_eq!(children_text(&container), vec!["Foo".to_string()]);
    }

    #[test]
    fn itemprop_skips_bad_tag_ancestors() {
        let doc = parse_document(
            r#"<html><body>
                <footer><span itemprop="name">Hidden</span></footer>
                <span itemprop="brand">Shown</span>
            </body></html>"#,
        );
        let container = collect(&doc, None);
        let texts = children_text(&container);
        assert!(texts.iter().any(|t| t == "Shown"));
        assert!(!texts.iter().any(|t| t == "Hidden"));
    }
}
