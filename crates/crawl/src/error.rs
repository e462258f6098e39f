//! Crawl Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A crawl error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for crawl operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The HTTP client could not be built from the given options.
    #[display("could not configure HTTP client")]
    Client,
    /// The request never produced a response (DNS, TLS, timeout, reset...).
    #[display("request failed: {_0}")]
    Network(#[error(not(source))] String),
    /// The chapter listing answered with something other than `200 OK`.
    #[display("failed to load chapters, contact developer or update app (HTTP {_0})")]
    Status(#[error(not(source))] u16),
    /// A page could not be turned into chapters or chapter text.
    #[display("could not extract content from page")]
    Extract,
    /// Reading from or writing to the chapter cache failed.
    #[display("chapter cache failure")]
    Cache,
    /// A chapter task panicked or was cancelled.
    #[display("chapter worker failed")]
    Worker,
    /// The merged document could not be written.
    #[display("could not write merged document")]
    Output,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Extract)
    }
}
