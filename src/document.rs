//! The [`Document`] entry point: owns the options, reparses the input
//! between retries, and runs the driver loop described in the pipeline
//! overview.

use kuchikikiki::NodeRef;
use serde::Serialize;

use crate::constants::{ParseFlags, BAD_TAGS};
use crate::error::{ReadabilityError, Result};
use crate::options::ReadabilityOptions;
use crate::scoring::CandidateStore;
use crate::{article, dom, links, meta, pruner, sanitizer, scoring, text};

/// The convenience views derived from a document, bundled for callers
/// (such as the CLI's `-v` flag) that want them as a single serializable
/// value rather than three separate method calls.
#[derive(Debug, Serialize)]
pub struct Metadata {
    pub title: String,
    pub short_title: String,
}

/// A single document to be summarized. Holds the original input and the
/// options governing how it is parsed; owns no DOM between calls, since
/// the driver may need a completely fresh parse on retry.
pub struct Document {
    input: String,
    options: ReadabilityOptions,
}

impl Document {
    /// Wrap `input` (a full HTML document or fragment) for summarization.
    pub fn new(input: impl Into<String>, options: ReadabilityOptions) -> Self {
        Self {
            input: input.into(),
            options,
        }
    }

    /// Run the full content-extraction pipeline and return the summary as
    /// an HTML string.
    ///
    /// When `html_partial` is true, only the extracted `<div>` subtree
    /// (plus the prepended meta block) is returned; otherwise a full
    /// `<html><body>...</body></html>` document is returned.
    pub fn summary(&self, html_partial: bool) -> Result<String> {
        let mut ruthless = true;

        loop {
            let dom_root = dom::parse_document(&self.input);
            links::resolve_links(&dom_root, self.options.url.as_ref());
            drop_bad_tags(&dom_root);
            mark_readability_body(&dom_root);

            let mut flags = ParseFlags::WEIGHT_CLASSES | ParseFlags::CLEAN_CONDITIONALLY;
            if ruthless {
                flags |= ParseFlags::STRIP_UNLIKELYS;
                pruner::remove_unlikely_candidates(&dom_root);
            }
            pruner::transform_misused_divs_into_paragraphs(&dom_root);

            let candidates = scoring::score_paragraphs(&dom_root, flags, self.options.min_text_length);
            let best = article::select_best_candidate(&candidates);

            let (article_root, is_fallback) = match best {
                Some(best) => (article::build_article(&best, &candidates, html_partial), false),
                None if ruthless => {
                    log::debug!("ruthless pass found no candidate, retrying leniently");
                    ruthless = false;
                    continue;
                }
                None => (fallback_body(&dom_root), true),
            };

            let target = if is_fallback || html_partial {
                article_root.clone()
            } else {
                article::inner_div(&article_root)
            };
            sanitizer::sanitize(&target, &candidates, self.options.min_text_length);

            let cleaned = serialize_result(&article_root);
            let acceptable = cleaned.chars().count() >= self.options.retry_length;

            if ruthless && !acceptable {
                log::debug!(
                    "ruthless pass produced {} chars, below retry_length {}; retrying leniently",
                    cleaned.chars().count(),
                    self.options.retry_length
                );
                ruthless = false;
                continue;
            }

            let meta_target_is_self = html_partial || is_fallback;
            return Ok(prepend_meta(&dom_root, &article_root, meta_target_is_self, &self.options, cleaned));
        }
    }

    /// The document's `<title>` text, or an empty string if absent.
    pub fn title(&self) -> String {
        let dom_root = dom::parse_document(&self.input);
        dom::first_element_by_tag(&dom_root, "title")
            .map(|t| text::clean(&dom::text_content(&t)))
            .unwrap_or_default()
    }

    /// A shortened version of [`Document::title`], splitting on common
    /// title separators (`|`, `-`, `:`, `»`, `/`) and keeping the longest
    /// side, which is usually the article title rather than the site name.
    pub fn short_title(&self) -> String {
        let title = self.title();
        shorten_title(&title)
    }

    /// Bundle [`Document::title`] and [`Document::short_title`] into one
    /// serializable value.
    pub fn metadata(&self) -> Metadata {
        Metadata {
            title: self.title(),
            short_title: self.short_title(),
        }
    }

    /// The document's full cleaned body: `<body>`'s content after
    /// dropping [`BAD_TAGS`] elements, with no scoring or candidate
    /// extraction applied. This is the "everything, lightly cleaned" view,
    /// as opposed to [`Document::summary`]'s extracted best-candidate view.
    pub fn content(&self) -> Result<String> {
        let dom_root = dom::parse_document(&self.input);
        links::resolve_links(&dom_root, self.options.url.as_ref());
        drop_bad_tags(&dom_root);

        let body = dom::first_element_by_tag(&dom_root, "body")
            .ok_or_else(|| ReadabilityError::unparseable("document has no body"))?;
        Ok(dom::serialize_children(&body))
    }
}

fn drop_bad_tags(root: &NodeRef) {
    let mut to_drop = Vec::new();
    for tag in BAD_TAGS {
        to_drop.extend(dom::select(root, tag));
    }
    for node in to_drop {
        dom::detach(&node);
    }
}

fn mark_readability_body(root: &NodeRef) {
    for body in dom::select(root, "body") {
        dom::set_attr(&body, "id", "readabilityBody");
    }
}

/// When no best candidate was found even in lenient mode, the driver
/// gives up on extraction and falls back to `<body>` (or the whole
/// document if somehow bodyless) regardless of `html_partial` — there is
/// no "div" to address in this path.
fn fallback_body(root: &NodeRef) -> NodeRef {
    dom::first_element_by_tag(root, "body").unwrap_or_else(|| root.clone())
}

fn serialize_result(article_root: &NodeRef) -> String {
    dom::serialize(article_root)
}

fn prepend_meta(
    original_dom: &NodeRef,
    article_root: &NodeRef,
    target_is_self: bool,
    options: &ReadabilityOptions,
    cleaned: String,
) -> String {
    let container = meta::collect(original_dom, options.domain.as_deref());
    if dom::element_children(&container).is_empty() {
        return cleaned;
    }

    let body = if target_is_self {
        article_root.clone()
    } else {
        dom::first_element_by_tag(article_root, "body").unwrap_or_else(|| article_root.clone())
    };

    match body.first_child() {
        Some(first) => first.insert_before(container),
        None => body.append(container),
    }

    dom::serialize(article_root)
}

/// Split `title` on the first/strongest separator and keep the longer,
/// meatier side — usually the article's own headline rather than the
/// surrounding site chrome ("Article Title | Site Name" -> "Article
/// Title").
fn shorten_title(title: &str) -> String {
    const SEPARATORS: &[&str] = &[" | ", " - ", " — ", " » ", " / ", ": "];

    for sep in SEPARATORS {
        if let Some(idx) = title.find(sep) {
            let (head, tail) = (&title[..idx], &title[idx + sep.len()..]);
            let (head, tail) = (head.trim(), tail.trim());
            if !head.is_empty() && !tail.is_empty() {
                return if head.chars().count() >= tail.chars().count() {
                    head.to_string()
                } else {
                    tail.to_string()
                };
            }
        }
    }

    title.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ReadabilityOptions {
        ReadabilityOptions::default()
    }

    #[test]
    fn s1_single_long_paragraph_survives() {
        let prose = "word ".repeat(60);
        let html = format!("<html><body><p>{prose}</p></body></html>");
        let doc = Document::new(html, options());
        let summary = doc.summary(true).unwrap();
        assert!(summary.contains("<p>"));
        assert!(summary.contains(prose.trim()));
    }

    #[test]
    fn s2_unlikely_candidate_is_dropped() {
        let mut html = String::from("<html><body><div class=\"comment\">spam content that goes on and on</div><article>");
        for _ in 0..5 {
            html.push_str(&format!("<p>{}</p>", "paragraph text ".repeat(20)));
        }
        html.push_str("</article></body></html>");

        let doc = Document::new(html, options());
        let summary = doc.summary(true).unwrap();
        assert!(!summary.contains("comment"));
    }

    #[test]
    fn s6_domain_prefix_is_stripped_from_meta() {
        let html = r#"<html><head><meta name="description" content="amazon.com Foo"></head>
            <body><article><p>A long enough paragraph to survive the pipeline, really quite long indeed, yes.</p></article></body></html>"#;
        let opts = ReadabilityOptions::builder().domain("amazon.com ").build();
        let doc = Document::new(html, opts);
        let summary = doc.summary(false).unwrap();
        assert!(summary.contains("Foo"));
    }

    #[test]
    fn title_reads_title_tag() {
        let doc = Document::new("<html><head><title>Hello World</title></head><body></body></html>", options());
        assert_eq!(doc.title(), "Hello World");
    }

    #[test]
    fn short_title_drops_site_name() {
        let doc = Document::new(
            "<html><head><title>Deep Dive Into Rust Ownership | Example Blog</title></head><body></body></html>",
            options(),
        );
        assert_eq!(doc.short_title(), "Deep Dive Into Rust Ownership");
    }

    #[test]
    fn content_keeps_everything_minus_bad_tags() {
        let doc = Document::new(
            "<html><body><nav>skip</nav><p>keep this paragraph</p></body></html>",
            options(),
        );
        let content = doc.content().unwrap();
        assert!(!content.contains("nav"));
        assert!(content.contains("keep this paragraph"));
    }

    #[test]
    fn configured_url_rewrites_relative_links_in_summary() {
        let html = r#"<html><body><article><p>A long enough paragraph to survive the
            pipeline, with a <a href="/related">related link</a> inside it, really.</p></article></body></html>"#;
        let opts = ReadabilityOptions::builder().url_str("https://example.com/posts/").unwrap().build();
        let doc = Document::new(html, opts);
        let summary = doc.summary(false).unwrap();
        assert!(summary.contains("https://example.com/related"));
    }
}
