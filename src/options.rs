//! Construction options for a [`crate::Document`].

use url::Url;

/// Minimum character length a paragraph's cleaned text must reach before it
/// is considered for scoring. Mirrors the source implementation's default.
pub const DEFAULT_MIN_TEXT_LENGTH: usize = 25;

/// Minimum output length (in characters) below which the driver retries
/// with unlikely-candidate pruning disabled.
pub const DEFAULT_RETRY_LENGTH: usize = 250;

/// Options controlling how a document is parsed and summarized.
///
/// Construct with [`ReadabilityOptions::builder`]:
///
/// ```
/// use readabilityrs::ReadabilityOptions;
///
/// let options = ReadabilityOptions::builder()
///     .char_threshold(100)
///     .build();
/// assert_eq!(options.min_text_length, 100);
/// ```
#[derive(Debug, Clone)]
pub struct ReadabilityOptions {
    /// Base URL used to resolve relative links. When absent, a `<base
    /// href="...">` found in the document is used instead.
    pub url: Option<Url>,
    /// A domain string stripped (case-insensitively, from both ends) of
    /// every meta-tag content value before it is inserted into the summary.
    pub domain: Option<String>,
    /// Minimum cleaned-text length for a paragraph to be scored.
    pub min_text_length: usize,
    /// Output length below which the driver retries non-ruthlessly.
    pub retry_length: usize,
    /// Reserved for future use; currently has no effect on the pipeline.
    pub debug: bool,
    /// Reserved for future use; currently has no effect on the pipeline.
    pub attributes: bool,
}

impl Default for ReadabilityOptions {
    fn default() -> Self {
        Self {
            url: None,
            domain: None,
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
            retry_length: DEFAULT_RETRY_LENGTH,
            debug: false,
            attributes: false,
        }
    }
}

impl ReadabilityOptions {
    /// Start building a set of options with the defaults above.
    pub fn builder() -> ReadabilityOptionsBuilder {
        ReadabilityOptionsBuilder::default()
    }
}

/// Fluent builder for [`ReadabilityOptions`].
#[derive(Debug, Default, Clone)]
pub struct ReadabilityOptionsBuilder {
    options: ReadabilityOptionsInner,
}

#[derive(Debug, Clone)]
struct ReadabilityOptionsInner {
    url: Option<Url>,
    domain: Option<String>,
    min_text_length: usize,
    retry_length: usize,
    debug: bool,
    attributes: bool,
}

impl Default for ReadabilityOptionsInner {
    fn default() -> Self {
        let defaults = ReadabilityOptions::default();
        Self {
            url: defaults.url,
            domain: defaults.domain,
            min_text_length: defaults.min_text_length,
            retry_length: defaults.retry_length,
            debug: defaults.debug,
            attributes: defaults.attributes,
        }
    }
}

impl ReadabilityOptionsBuilder {
    /// Set the base URL used to resolve relative links.
    pub fn url(mut self, url: Url) -> Self {
        self.options.url = Some(url);
        self
    }

    /// Parse and set the base URL used to resolve relative links.
    pub fn url_str(mut self, url: &str) -> Result<Self, url::ParseError> {
        self.options.url = Some(Url::parse(url)?);
        Ok(self)
    }

    /// Set the domain prefix/suffix stripped from meta-tag content.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.options.domain = Some(domain.into());
        self
    }

    /// Set the minimum cleaned-text length considered during scoring.
    ///
    /// Named `char_threshold` to match the constructor option exposed by
    /// the reference implementation this crate ports.
    pub fn char_threshold(mut self, min_text_length: usize) -> Self {
        self.options.min_text_length = min_text_length;
        self
    }

    /// Set the output-length floor that triggers a non-ruthless retry.
    pub fn retry_length(mut self, retry_length: usize) -> Self {
        self.options.retry_length = retry_length;
        self
    }

    /// Reserved for future use; currently has no effect on the pipeline.
    pub fn debug(mut self, debug: bool) -> Self {
        self.options.debug = debug;
        self
    }

    /// Reserved for future use; currently has no effect on the pipeline.
    pub fn attributes(mut self, attributes: bool) -> Self {
        self.options.attributes = attributes;
        self
    }

    /// Finish building the options.
    pub fn build(self) -> ReadabilityOptions {
        ReadabilityOptions {
            url: self.options.url,
            domain: self.options.domain,
            min_text_length: self.options.min_text_length,
            retry_length: self.options.retry_length,
            debug: self.options.debug,
            attributes: self.options.attributes,
        }
    }
}
