//! Storage for downloaded lists.
//!
//! `FsCacheStore` keeps one file per list under the cache directory and
//! replaces it atomically (temp file in the same directory, then rename), so
//! a reader never sees a half-written list. `MemoryCacheStore` is the
//! in-process stand-in used by tests.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use async_trait::async_trait;

use crate::config::CACHE_DIR_NAME;
use crate::error_handling::FetchError;

/// Key/value storage with modification times.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// When `key` was last written, or `None` if it does not exist.
    async fn modified(&self, key: &str) -> Option<SystemTime>;

    /// Full contents of `key`.
    async fn read(&self, key: &str) -> Result<String, FetchError>;

    /// Replaces `key` with `contents`.
    async fn write(&self, key: &str, contents: &str) -> Result<(), FetchError>;
}

/// Returns the default cache directory for downloaded lists.
///
/// - Linux: `$XDG_CACHE_HOME/reputation_check` or `~/.cache/reputation_check`
/// - macOS: `~/Library/Caches/reputation_check`
/// - Windows: `{FOLDERID_LocalAppData}\reputation_check`
///
/// Falls back to `./.cache/reputation_check` if the cache directory cannot be
/// determined.
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir().map_or_else(
        || PathBuf::from(".cache").join(CACHE_DIR_NAME),
        |p| p.join(CACHE_DIR_NAME),
    )
}

/// One file per key under `dir`.
#[derive(Debug, Clone)]
pub struct FsCacheStore {
    dir: PathBuf,
}

impl FsCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

fn cache_io(path: &Path, source: std::io::Error) -> FetchError {
    FetchError::CacheIo {
        path: path.to_path_buf(),
        source,
    }
}

#[async_trait]
impl CacheStore for FsCacheStore {
    async fn modified(&self, key: &str) -> Option<SystemTime> {
        let metadata = tokio::fs::metadata(self.path_for(key)).await.ok()?;
        metadata.modified().ok()
    }

    async fn read(&self, key: &str) -> Result<String, FetchError> {
        let path = self.path_for(key);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| cache_io(&path, e))
    }

    async fn write(&self, key: &str, contents: &str) -> Result<(), FetchError> {
        let dir = self.dir.clone();
        let path = self.path_for(key);
        let contents = contents.to_owned();

        // tempfile is synchronous; keep it off the async workers
        tokio::task::spawn_blocking(move || {
            std::fs::create_dir_all(&dir).map_err(|e| cache_io(&dir, e))?;
            let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| cache_io(&dir, e))?;
            tmp.write_all(contents.as_bytes())
                .and_then(|_| tmp.flush())
                .map_err(|e| cache_io(tmp.path(), e))?;
            tmp.persist(&path).map_err(|e| cache_io(&path, e.error))?;
            log::debug!("Saved list to cache: {}", path.display());
            Ok(())
        })
        .await
        .map_err(|e| cache_io(&self.dir, std::io::Error::other(e)))?
    }
}

/// In-memory store; modification times can be rewound to simulate ageing.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, (String, SystemTime)>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the modification time of an existing entry.
    pub fn set_modified(&self, key: &str, when: SystemTime) {
        if let Ok(mut entries) = self.entries.lock() {
            if let Some(entry) = entries.get_mut(key) {
                entry.1 = when;
            }
        }
    }

    /// Inserts an entry with an explicit modification time.
    pub fn insert(&self, key: &str, contents: &str, when: SystemTime) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), (contents.to_string(), when));
        }
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn modified(&self, key: &str) -> Option<SystemTime> {
        self.entries.lock().ok()?.get(key).map(|(_, when)| *when)
    }

    async fn read(&self, key: &str) -> Result<String, FetchError> {
        let entries = self.entries.lock().map_err(|_| {
            cache_io(Path::new(key), std::io::Error::other("cache lock poisoned"))
        })?;
        entries
            .get(key)
            .map(|(contents, _)| contents.clone())
            .ok_or_else(|| cache_io(Path::new(key), std::io::ErrorKind::NotFound.into()))
    }

    async fn write(&self, key: &str, contents: &str) -> Result<(), FetchError> {
        self.insert(key, contents, SystemTime::now());
        Ok(())
    }
}
