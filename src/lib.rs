//! A Rust port of the content-scoring and sanitization pipeline at the
//! heart of Mozilla's Readability / python-readability: given a parsed
//! HTML document, extract the subtree most likely to be the article's
//! main content.
//!
//! The pipeline is a multi-pass heuristic state machine, run after
//! [`links`] resolves relative `href`/`src` attributes against the
//! configured base URL (or the document's own `<base href>`):
//!
//! 1. [`pruner`] removes elements whose class/id look like navigation,
//!    ads, or comments, and normalizes misused `<div>`s into `<p>`s.
//! 2. [`scoring`] walks paragraph-like elements and seeds scores on their
//!    parents and grandparents, scaled by link density.
//! 3. [`article`] picks the top-scored element and gathers its eligible
//!    siblings into an output container.
//! 4. [`sanitizer`] conditionally removes tables/lists/divs that still
//!    look like chrome, with a sibling-rescue escape hatch.
//! 5. [`meta`] collects `<meta>`/`[itemprop]` values into a block
//!    prepended to the final body.
//!
//! [`document::Document`] is the outer driver that runs this loop once
//! "ruthlessly" and, if the result comes out too short, a second time
//! with unlikely-candidate pruning disabled.
//!
//! ```
//! use readabilityrs::{Document, ReadabilityOptions};
//!
//! let html = "<html><body><article><p>".to_string()
//!     + &"A long enough paragraph to survive scoring and sanitization. ".repeat(5)
//!     + "</p></article></body></html>";
//! let doc = Document::new(html, ReadabilityOptions::default());
//! let summary = doc.summary(true).unwrap();
//! assert!(summary.contains("<p>"));
//! ```

pub mod article;
pub mod constants;
pub mod document;
pub mod dom;
pub mod error;
pub mod links;
pub mod meta;
pub mod options;
pub mod pruner;
pub mod sanitizer;
pub mod scoring;
pub mod text;

pub use document::{Document, Metadata};
pub use error::{ReadabilityError, Result};
pub use options::{ReadabilityOptions, ReadabilityOptionsBuilder};
