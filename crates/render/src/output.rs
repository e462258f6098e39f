use std::path::PathBuf;

/// File names derived from the user-supplied output name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Merged chapters, handed to the converter.
    pub html: PathBuf,
    /// What the converter writes.
    pub text: PathBuf,
}

impl OutputPaths {
    /// `novel` and `novel.txt` both give `novel.html` and `novel.txt`.
    pub fn new(name: &str) -> Self {
        let stem = name.strip_suffix(".txt").unwrap_or(name);
        Self { html: PathBuf::from(format!("{stem}.html")), text: PathBuf::from(format!("{stem}.txt")) }
    }
}
