//! Cache Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};
use std::io::Error as IoError;
use std::path::PathBuf;

/// A cache error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
/// A missing entry is never an error: [`Store::get`](crate::Store::get)
/// reports it as `None`.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The cache directory exists but is not a directory, or could not be created.
    #[display("invalid cache directory: {}", _0.display())]
    InvalidDirectory(#[error(not(source))] PathBuf),
    /// Access denied while reading or writing an entry.
    #[display("permission denied: {}", _0.display())]
    PermissionDenied(#[error(not(source))] PathBuf),
    /// Underlying I/O error.
    #[display("I/O error: {_0}")]
    Io(IoError),
    /// A value could not be encoded before writing it to disk.
    #[display("could not serialize cache entry for key: {_0}")]
    Serialize(#[error(not(source))] String),
    /// An entry exists on disk, but does not decode into the requested type.
    #[display("invalid cache data: {}", _0.display())]
    InvalidData(#[error(not(source))] PathBuf),
}
impl From<IoError> for ErrorKind {
    fn from(err: IoError) -> Self {
        Self::Io(err)
    }
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
