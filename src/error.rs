//! Application Error Types

use derive_more::{Display, Error};

/// An application error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for the binary.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("invalid configuration")]
    Config,
    #[display("there is no supported provider for this url: {_0} (see --supported-websites)")]
    UnsupportedUrl(#[error(not(source))] String),
    #[display("calibre is not available")]
    ConverterMissing,
    #[display("download failed")]
    Crawl,
    #[display("conversion failed; the merged HTML is kept, run again to retry")]
    Convert(#[error(not(source))] i32),
}

impl ErrorKind {
    /// Exit code the process should end with. A failed conversion passes
    /// the converter's own exit code through.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Convert(code) => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}
