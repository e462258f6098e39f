//! Extraction Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// An extraction error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A provider declared a CSS selector that does not parse.
    #[display("invalid selector: {_0}")]
    InvalidSelector(#[error(not(source))] String),
    /// A URL could not be parsed, or has no host to qualify links against.
    #[display("invalid URL: {_0}")]
    InvalidUrl(#[error(not(source))] String),
    /// The payload selector matched nothing on a chapter page.
    #[display("no chapter content found at: {_0}")]
    MissingPayload(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A page without content might be a transient error page served by
        // the site; selectors and URLs are either valid or they're not.
        matches!(self, Self::MissingPayload(_))
    }
}
