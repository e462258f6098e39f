//! Local filesystem, content-addressed key/value store.
//!
//! Every entry lives in its own file directly inside the cache directory,
//! named after the lowercase hex [`digest`] of its key. Values are encoded as
//! JSON, which is self-describing and good enough for a private, rebuildable
//! cache; the byte layout is not a compatibility promise.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::create_dir_all as sync_create_dir;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::instrument;

/// Suffix of the scratch file an entry is written to before being renamed
/// into place.
const PARTIAL_SUFFIX: &str = "partial";

/// Returns the lowercase hex digest (BLAKE3, 256-bit) used to address `key`.
///
/// Only the bytes of the key are hashed, so equal keys always map to the same
/// entry. Raw keys are never compared; two keys with colliding digests would
/// share an entry.
///
/// ```
/// let digest = novelfetch_cache::digest("https://example.com/chapter-1");
/// assert_eq!(digest.len(), 64);
/// assert_eq!(digest, novelfetch_cache::digest("https://example.com/chapter-1"));
/// ```
pub fn digest(key: impl AsRef<[u8]>) -> String {
    blake3::hash(key.as_ref()).to_hex().to_string()
}

/// Durable key/value store addressed by the digest of each key.
///
/// Every [`put`](Self::put) and [`get`](Self::get) holds a single store-wide
/// lock for its whole duration. Fetching chapters is dominated by network
/// latency, so contention on this lock is negligible.
///
/// # Examples
///
/// ```no_run
/// use novelfetch_cache::Store;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Store::open(".cache")?;
/// store.put("https://example.com/chapter-1", "<p>Once upon a time</p>").await?;
/// let chapter: Option<String> = store.get("https://example.com/chapter-1").await?;
/// assert!(chapter.is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
    lock: Mutex<()>,
}

impl Store {
    /// Open (creating if necessary) the store rooted at `root`.
    ///
    /// Relative paths are resolved against the current working directory at
    /// the time each entry is accessed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if root.exists() {
            if !root.is_dir() {
                exn::bail!(ErrorKind::InvalidDirectory(root));
            }
        } else {
            // Happens once per run, not worth making the constructor async.
            sync_create_dir(&root).or_raise(|| ErrorKind::InvalidDirectory(root.clone()))?;
            tracing::debug!(root = %root.display(), "Created cache directory");
        }
        Ok(Self { root, lock: Mutex::new(()) })
    }

    /// Directory containing the cache entries.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing the entry for `key` (which may not exist yet).
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(digest(key))
    }

    /// Persist `value` under `key`, replacing any previous value.
    ///
    /// The value is written to a scratch file first and then renamed over
    /// the entry, so an interrupted run never leaves a truncated entry behind.
    #[instrument(skip(self, value))]
    pub async fn put<V: Serialize + ?Sized>(&self, key: &str, value: &V) -> Result<()> {
        let bytes = serde_json::to_vec(value).or_raise(|| ErrorKind::Serialize(key.to_string()))?;
        let path = self.path_for(key);
        let partial = path.with_extension(PARTIAL_SUFFIX);

        let _guard = self.lock.lock().await;
        fs::write(&partial, &bytes).await.map_err(|e| Self::map_io_error(e, &partial))?;
        fs::rename(&partial, &path).await.map_err(|e| Self::map_io_error(e, &path))?;
        tracing::trace!(path = %path.display(), size = bytes.len(), "Cache entry written");
        Ok(())
    }

    /// Fetch the value stored under `key`.
    ///
    /// Returns `Ok(None)` when no entry exists. An entry that exists but
    /// cannot be decoded as `V` is an [`InvalidData`](ErrorKind::InvalidData)
    /// error, never a miss.
    #[instrument(skip(self))]
    pub async fn get<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>> {
        let path = self.path_for(key);
        let bytes = {
            let _guard = self.lock.lock().await;
            match fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                Err(e) => exn::bail!(Self::map_io_error(e, &path)),
            }
        };
        let value = serde_json::from_slice(&bytes).or_raise(|| ErrorKind::InvalidData(path.clone()))?;
        Ok(Some(value))
    }

    /// Returns `true` if an entry exists for `key`, regardless of its contents.
    pub async fn contains(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key);
        let _guard = self.lock.lock().await;
        Ok(fs::try_exists(&path).await.map_err(|e| Self::map_io_error(e, &path))?)
    }

    fn map_io_error(e: std::io::Error, path: &Path) -> ErrorKind {
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied(path.to_path_buf()),
            _ => ErrorKind::Io(e),
        }
    }
}
