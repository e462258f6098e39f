use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use novelfetch_cache::Store;
use novelfetch_extract::Resource;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::instrument;

/// The document produced by [`merge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    pub path: PathBuf,
    /// Chapters with nothing in the cache, written as blank lines.
    pub missing: usize,
}

/// Writes the cached payload of every chapter in `resources`, in list order
/// and each followed by a newline, to a new file at `path`.
///
/// Chapters that were never fetched contribute an empty line so the run
/// still produces a document; their number is reported in [`Merged`].
#[instrument(skip(store, resources), fields(chapters = resources.len(), path = %path.display()))]
pub async fn merge(store: &Store, resources: &[Resource], path: &Path) -> Result<Merged> {
    let file = File::create(path).await.or_raise(|| ErrorKind::Output)?;
    let mut writer = BufWriter::new(file);
    let mut missing = 0;
    for resource in resources {
        let payload: Option<String> = store.get(&resource.locator).await.or_raise(|| ErrorKind::Cache)?;
        let payload = payload.unwrap_or_default();
        if payload.is_empty() {
            tracing::debug!(locator = %resource.locator, "Chapter missing from cache");
            missing += 1;
        }
        writer.write_all(payload.as_bytes()).await.or_raise(|| ErrorKind::Output)?;
        writer.write_all(b"\n").await.or_raise(|| ErrorKind::Output)?;
    }
    writer.flush().await.or_raise(|| ErrorKind::Output)?;
    if missing > 0 {
        tracing::warn!(missing, "Some chapters are missing from the merged document");
    }
    Ok(Merged { path: path.to_path_buf(), missing })
}
