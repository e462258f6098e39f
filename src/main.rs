mod cli;
mod error;
mod logging;

use crate::cli::Args;
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::{OptionExt, ResultExt};
use novelfetch_cache::Store;
use novelfetch_config::Config;
use novelfetch_crawl::transport::{HttpOptions, HttpTransport};
use novelfetch_crawl::{Context, discover, fetch_all, merge};
use novelfetch_extract::Registry;
use novelfetch_render::{Converter, OutputPaths};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let registry = Registry::default();
    if args.supported_websites {
        for domain in registry.domains() {
            println!("{domain}");
        }
        return ExitCode::SUCCESS;
    }

    match run(&args, &registry).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(err.exit_code())
        },
    }
}

async fn run(args: &Args, registry: &Registry) -> Result<()> {
    let url = args.url.as_deref().unwrap_or_default();
    let provider = registry.find(url).ok_or_raise(|| ErrorKind::UnsupportedUrl(url.to_string()))?;
    let config = Config::load(args.config.as_deref(), &args.overrides()).or_raise(|| ErrorKind::Config)?;

    // Before any downloading: there's no point fetching a novel that can't
    // be converted afterwards.
    let converter = match args.skip_convert {
        true => None,
        false => Some(Converter::discover(config.converter.directory.as_deref()).or_raise(|| ErrorKind::ConverterMissing)?),
    };

    let store = Store::open(&config.cache_dir).or_raise(|| ErrorKind::Crawl)?;
    let transport = HttpTransport::new(&HttpOptions {
        user_agent: config.user_agent.clone(),
        timeout: config.request_timeout(),
        insecure_tls: config.insecure_tls,
    })
    .or_raise(|| ErrorKind::Crawl)?;
    let ctx = Arc::new(Context::new(store, Arc::new(transport), config.workers));

    tracing::info!(domain = provider.domain, %url, "Loading chapter list");
    let resources = discover(&ctx, provider, url).await.or_raise(|| ErrorKind::Crawl)?;
    let summary = fetch_all(&ctx, provider, &resources).await.or_raise(|| ErrorKind::Crawl)?;
    if summary.skipped > 0 {
        tracing::warn!(skipped = summary.skipped, "Some chapters could not be downloaded; run again to retry them");
    }

    let paths = OutputPaths::new(&args.output);
    let merged = merge(&ctx.store, &resources, &paths.html).await.or_raise(|| ErrorKind::Crawl)?;
    tracing::info!(path = %merged.path.display(), chapters = resources.len(), missing = merged.missing, "Chapters merged");

    let Some(converter) = converter else {
        tracing::info!("Conversion skipped");
        return Ok(());
    };
    if let Err(err) = converter.convert(&paths.html, &paths.text) {
        let code = err.exit_code();
        return Err(err).or_raise(|| ErrorKind::Convert(code));
    }
    Ok(())
}
