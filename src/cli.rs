use clap::{ArgAction, Parser};
use novelfetch_config::Overrides;
use std::path::PathBuf;

/// Download every chapter of a web novel and convert it into a single book.
///
/// Chapters are cached as they are downloaded, so an interrupted run can
/// simply be started again.
#[derive(Parser, Debug, Clone)]
#[command(name = "novelfetch", version, about)]
pub struct Args {
    /// Table-of-contents URL of the novel
    #[arg(short, long, required_unless_present = "supported_websites")]
    pub url: Option<String>,

    /// Output name; produces `<name>.html` and `<name>.txt`
    #[arg(short, long, default_value = "novel")]
    pub output: String,

    /// Directory containing calibre's `ebook-convert`
    #[arg(short = 'c', long)]
    pub calibre_dir: Option<PathBuf>,

    /// List the supported websites and exit
    #[arg(long)]
    pub supported_websites: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of chapters to download at the same time
    #[arg(long)]
    pub workers: Option<usize>,

    /// Directory holding downloaded chapters
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Accept invalid TLS certificates
    #[arg(long)]
    pub insecure: bool,

    /// Stop after writing the merged HTML; don't run calibre
    #[arg(long)]
    pub skip_convert: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Settings given on the command line, taking precedence over every
    /// other configuration source.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            cache_dir: self.cache_dir.clone(),
            workers: self.workers,
            insecure_tls: self.insecure.then_some(true),
            converter_directory: self.calibre_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["novelfetch", "-u", "https://boxnovel.com/novel/x"]).unwrap();
        assert_eq!(args.url.as_deref(), Some("https://boxnovel.com/novel/x"));
        assert_eq!(args.output, "novel");
        assert!(!args.skip_convert);
        assert_eq!(args.verbose, 0);
        let overrides = args.overrides();
        assert!(overrides.cache_dir.is_none());
        assert!(overrides.workers.is_none());
        assert!(overrides.insecure_tls.is_none());
        assert!(overrides.converter_directory.is_none());
    }

    #[test]
    fn test_url_required() {
        assert!(Args::try_parse_from(["novelfetch"]).is_err());
    }

    #[test]
    fn test_supported_websites_without_url() {
        let args = Args::try_parse_from(["novelfetch", "--supported-websites"]).unwrap();
        assert!(args.supported_websites);
        assert!(args.url.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "novelfetch",
            "--url",
            "https://x.com",
            "-o",
            "book.txt",
            "-c",
            "/opt/calibre",
            "--workers",
            "8",
            "--cache-dir",
            "/tmp/chapters",
            "--insecure",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.output, "book.txt");
        assert_eq!(args.verbose, 2);
        let overrides = args.overrides();
        assert_eq!(overrides.workers, Some(8));
        assert_eq!(overrides.insecure_tls, Some(true));
        assert_eq!(overrides.cache_dir, Some(PathBuf::from("/tmp/chapters")));
        assert_eq!(overrides.converter_directory, Some(PathBuf::from("/opt/calibre")));
    }
}
