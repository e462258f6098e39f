use tracing_subscriber::EnvFilter;

/// Crates whose logging `-v` turns up. Dependencies stay at `info`.
const CRATES: [&str; 6] = [
    "novelfetch",
    "novelfetch_cache",
    "novelfetch_config",
    "novelfetch_crawl",
    "novelfetch_extract",
    "novelfetch_render",
];

/// Installs a formatting subscriber writing to stderr.
///
/// Without `-v`, `RUST_LOG` decides (defaulting to `info`). Any `-v` wins
/// over `RUST_LOG`.
pub fn init(verbosity: u8) {
    let filter = match directives(verbosity) {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}

fn directives(verbosity: u8) -> Option<String> {
    let level = match verbosity {
        0 => return None,
        1 => "debug",
        _ => "trace",
    };
    let crates = CRATES.iter().map(|name| format!("{name}={level}"));
    Some(std::iter::once("info".to_string()).chain(crates).collect::<Vec<_>>().join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "debug")]
    #[case(2, "trace")]
    #[case(5, "trace")]
    fn test_directives(#[case] verbosity: u8, #[case] level: &str) {
        let directives = directives(verbosity).unwrap();
        assert!(directives.starts_with("info,"));
        assert!(directives.contains(&format!("novelfetch_crawl={level}")));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_quiet_defers_to_environment() {
        assert!(directives(0).is_none());
    }
}
