//! Error types returned by the readability pipeline.

use thiserror::Error;

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, ReadabilityError>;

/// Errors that can escape the readability pipeline.
///
/// The pipeline itself is designed to degrade gracefully: a missing best
/// candidate or a too-short result is handled by the driver's retry loop,
/// never by raising an error. `ReadabilityError::Unparseable` is reserved
/// for failures that indicate the input (or an internal invariant) is
/// genuinely broken — a parser panic, a malformed document that cannot be
/// reparsed on retry, or a serialization failure.
///
/// ```
/// use readabilityrs::error::ReadabilityError;
///
/// let err = ReadabilityError::Unparseable("empty document".into());
/// assert_eq!(err.to_string(), "unparseable document: empty document");
/// ```
#[derive(Debug, Error)]
pub enum ReadabilityError {
    /// The pipeline could not produce a result from the supplied input.
    #[error("unparseable document: {0}")]
    Unparseable(String),

    /// The supplied base URL (or a `<base href>` found in the document)
    /// could not be parsed.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Serializing the resulting DOM subtree back to an HTML string failed.
    #[error("failed to serialize output: {0}")]
    Serialize(String),
}

impl ReadabilityError {
    pub(crate) fn unparseable(msg: impl Into<String>) -> Self {
        ReadabilityError::Unparseable(msg.into())
    }
}
