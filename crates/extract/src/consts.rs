use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

/// Heading prefix given to every chapter.
pub(crate) const CHAPTER_PREFIX: &str = "Chapter";

// Runs of path separators, including the pair following the scheme.
regex!(REPEATED_SLASHES, r"/{2,}");
// Scheme whose `//` was collapsed along with the rest of the path.
regex!(MANGLED_SCHEME, r"^(https?):/+");
// Doubled heading prefix when a label already starts with "Chapter".
regex!(DOUBLED_PREFIX, r"^Chapter\s+Chapter\b");
