//! Render Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A render error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for render operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("couldn't find calibre's ebook-convert; install calibre or pass its location with --calibre-dir")]
    ConverterNotFound,
    /// ebook-convert exited with a non-zero exit code, or was killed by a
    /// signal (reported as `-1`).
    #[display("ebook-convert exited with code: {_0}")]
    ConverterFailed(#[error(not(source))] i32),
    Io,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Exit code the process should end with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConverterFailed(code) if *code > 0 => *code,
            _ => 1,
        }
    }
}
