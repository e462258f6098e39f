use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::instrument;

/// Name of calibre's command-line converter.
pub const EXECUTABLE: &str = "ebook-convert";

/// Flags turning the merged HTML into clean Markdown-flavoured text.
const FLAGS: [&str; 8] = [
    "--smarten-punctuation",
    "--txt-output-formatting",
    "markdown",
    "--force-max-line-length",
    "--keep-links",
    "--enable-heuristics",
    "--html-unwrap-factor",
    "0.4",
];

/// A located `ebook-convert` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converter {
    path: PathBuf,
}

impl Converter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Looks in `directory` first (when given), then on `PATH`.
    pub fn discover(directory: Option<&Path>) -> Result<Self> {
        if let Some(directory) = directory {
            match Self::in_directory(directory) {
                Ok(converter) => return Ok(converter),
                Err(_) => tracing::info!(directory = %directory.display(), "Converter not in configured directory; trying PATH"),
            }
        }
        match which::which(EXECUTABLE) {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Converter found on PATH");
                Ok(Self { path })
            },
            Err(_) => exn::bail!(ErrorKind::ConverterNotFound),
        }
    }

    /// Looks in `directory` only.
    pub fn in_directory(directory: &Path) -> Result<Self> {
        let path =
            which::which_in(EXECUTABLE, Some(directory.as_os_str()), directory).or_raise(|| ErrorKind::ConverterNotFound)?;
        tracing::debug!(path = %path.display(), "Converter found");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs the converter from `input` to `output`, blocking until it exits.
    ///
    /// The converter's own output goes straight to the console.
    #[instrument(skip(self), fields(converter = %self.path.display()))]
    pub fn convert(&self, input: &Path, output: &Path) -> Result<()> {
        tracing::info!("Converting with calibre");
        let status = Command::new(&self.path)
            .arg(input)
            .arg(output)
            .args(FLAGS)
            .status()
            .or_raise(|| ErrorKind::Io)?;
        if !status.success() {
            exn::bail!(ErrorKind::ConverterFailed(status.code().unwrap_or(-1)));
        }
        tracing::info!(output = %output.display(), "Conversion finished");
        Ok(())
    }
}
