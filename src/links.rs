//! Relative-link resolution: spec.md §6's `url` constructor option ("if
//! present, rewrite all relative links to absolute; otherwise resolve
//! `<base href="...">`"). Mirrors `original_source/readability.py`'s
//! `_parse` step (`doc.make_links_absolute(base_href, resolve_base_href=True)`
//! / `doc.resolve_base_href()`), run once per parse, before the rest of the
//! pipeline sees the DOM.

use kuchikikiki::NodeRef;
use url::Url;

use crate::dom;

/// Tags/attributes rewritten when a base is available. `<a href>` is the
/// only one the scoring/sanitizing pipeline itself reads (via
/// [`dom::link_density`]); `<img src>` is included too since it is the
/// other attribute a caller rendering the output HTML would expect to be
/// absolute.
const HREF_TARGETS: &[&str] = &["a", "link"];
const SRC_TARGETS: &[&str] = &["img", "script", "iframe", "source"];

/// Rewrite relative `href`/`src` attributes in `root` to absolute, using
/// `configured` (the `url` option) when given, or the document's own
/// `<base href>` otherwise. A no-op if neither is present or parseable.
pub fn resolve_links(root: &NodeRef, configured: Option<&Url>) {
    let Some(base) = effective_base(root, configured) else {
        return;
    };

    for tag in HREF_TARGETS {
        for el in dom::select(root, tag) {
            rewrite_attr(&el, "href", &base);
        }
    }
    for tag in SRC_TARGETS {
        for el in dom::select(root, tag) {
            rewrite_attr(&el, "src", &base);
        }
    }
}

/// The base URL relative links should be resolved against, per spec.md §6:
/// when `configured` is given, the document's own `<base href>` (if any) is
/// itself resolved against `configured` first; otherwise the document's
/// `<base href>` is used as-is, and only if it is already absolute (there is
/// no further base to resolve it against).
fn effective_base(root: &NodeRef, configured: Option<&Url>) -> Option<Url> {
    let base_href = dom::first_element_by_tag(root, "base").and_then(|b| dom::attr(&b, "href"));

    match configured {
        Some(configured) => match base_href {
            Some(href) => configured.join(&href).ok().or_else(|| Some(configured.clone())),
            None => Some(configured.clone()),
        },
        None => base_href.and_then(|href| Url::parse(&href).ok()),
    }
}

fn rewrite_attr(el: &NodeRef, attr_name: &str, base: &Url) {
    let Some(value) = dom::attr(el, attr_name) else {
        return;
    };
    if value.trim().is_empty() || Url::parse(&value).is_ok() {
        return;
    }
    if let Ok(resolved) = base.join(&value) {
        dom::set_attr(el, attr_name, resolved.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;

    #[test]
    fn rewrites_relative_href_against_configured_url() {
        let doc = parse_document(r#"<html><body><a href="/page">link</a></body></html>"#);
        let base = Url::parse("https://example.com/dir/").unwrap();
        resolve_links(&doc, Some(&base));
        let a = dom::first_element_by_tag(&doc, "a").unwrap();
        assert_eq!(dom::attr(&a, "href").as_deref(), Some("https://example.com/page"));
    }

    #[test]
    fn resolves_against_document_base_tag_when_no_configured_url() {
        let doc = parse_document(
            r#"<html><head><base href="https://example.com/blog/"></head><body><a href="post">link</a></body></html>"#,
        );
        resolve_links(&doc, None);
        let a = dom::first_element_by_tag(&doc, "a").unwrap();
        assert_eq!(dom::attr(&a, "href").as_deref(), Some("https://example.com/blog/post"));
    }

    #[test]
    fn configured_url_takes_precedence_and_resolves_relative_base_tag() {
        let doc = parse_document(
            r#"<html><head><base href="blog/"></head><body><a href="post">link</a></body></html>"#,
        );
        let base = Url::parse("https://example.com/site/").unwrap();
        resolve_links(&doc, Some(&base));
        let a = dom::first_element_by_tag(&doc, "a").unwrap();
        assert_eq!(dom::attr(&a, "href").as_deref(), Some("https://example.com/site/blog/post"));
    }

    #[test]
    fn leaves_absolute_links_untouched() {
        let doc = parse_document(r#"<html><body><a href="https://other.example/x">link</a></body></html>"#);
        let base = Url::parse("https://example.com/").unwrap();
        resolve_links(&doc, Some(&base));
        let a = dom::first_element_by_tag(&doc, "a").unwrap();
        assert_eq!(dom::attr(&a, "href").as_deref(), Some("https://other.example/x"));
    }

    #[test]
    fn no_base_available_is_a_no_op() {
        let doc = parse_document(r#"<html><body><a href="/page">link</a></body></html>"#);
        resolve_links(&doc, None);
        let a = dom::first_element_by_tag(&doc, "a").unwrap();
        assert_eq!(dom::attr(&a, "href").as_deref(), Some("/page"));
    }

    #[test]
    fn rewrites_img_src_too() {
        let doc = parse_document(r#"<html><body><img src="pic.png"></body></html>"#);
        let base = Url::parse("https://example.com/dir/").unwrap();
        resolve_links(&doc, Some(&base));
        let img = dom::first_element_by_tag(&doc, "img").unwrap();
        assert_eq!(dom::attr(&img, "src").as_deref(), Some("https://example.com/dir/pic.png"));
    }
}
