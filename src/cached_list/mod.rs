//! List-membership services.
//!
//! Some reputation sources publish a plain list of addresses instead of a DNS
//! zone. `CachedList` downloads such a list at most once per TTL, keeps it in
//! a `CacheStore`, and answers membership checks from the cached copy.
//!
//! Refreshes are serialized behind an async mutex, so concurrent checks never
//! trigger parallel downloads or read a list while it is being replaced.

mod store;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use reqwest::Client;
use tokio::sync::Mutex;
use tokio_retry::RetryIf;

use crate::classify::{ClassificationResult, ListingStatus};
use crate::config::{LIST_CACHE_TTL, RETRY_MAX_RETRIES};
use crate::error_handling::{get_retry_strategy, FetchError};
use crate::registry::BlocklistService;
use crate::target::Target;

// Re-export public API
pub use store::{default_cache_dir, CacheStore, FsCacheStore, MemoryCacheStore};

/// What `ensure_fresh` had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The cached copy was younger than the TTL.
    Fresh,
    /// A new copy was downloaded and stored.
    Refreshed,
}

/// Parsed list, remembered together with the store timestamp it came from.
struct LoadedSet {
    modified: SystemTime,
    entries: Arc<HashSet<String>>,
}

/// A periodically downloaded address list.
pub struct CachedList {
    url: String,
    key: String,
    ttl: Duration,
    retries: usize,
    client: Client,
    store: Arc<dyn CacheStore>,
    state: Mutex<Option<LoadedSet>>,
}

impl CachedList {
    /// A list fetched from `url` and stored under `key`, refreshed every 24h.
    pub fn new(
        url: impl Into<String>,
        key: impl Into<String>,
        client: Client,
        store: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            ttl: LIST_CACHE_TTL,
            retries: RETRY_MAX_RETRIES,
            client,
            store,
            state: Mutex::new(None),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Number of retries after a failed download attempt.
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Downloads the list if it is missing or older than the TTL.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if a download was needed and failed, or the new
    /// copy could not be stored. Existing cached data is left untouched.
    pub async fn ensure_fresh(&self) -> Result<Freshness, FetchError> {
        let _guard = self.state.lock().await;
        self.refresh_if_stale().await
    }

    /// Checks whether `target` appears in the list.
    ///
    /// A failed refresh falls back to a stale copy when one exists; with no
    /// copy at all the result is an explicit error, never "not listed".
    pub async fn check(&self, service: &BlocklistService, target: &Target) -> ClassificationResult {
        let entries = match self.load().await {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("{}: {}", service.name, e);
                return ClassificationResult::failed(service, "could not refresh list");
            }
        };

        let needle = target.to_string();
        if entries.contains(&needle) {
            log::info!("{needle} found in {} list", service.name);
            ClassificationResult::new(service, ListingStatus::Listed, "Listed in bad-guys list")
        } else {
            log::debug!("{needle} not found in {} list", service.name);
            ClassificationResult::not_listed(service)
        }
    }

    async fn load(&self) -> Result<Arc<HashSet<String>>, FetchError> {
        let mut state = self.state.lock().await;

        if let Err(e) = self.refresh_if_stale().await {
            if self.store.modified(&self.key).await.is_none() {
                return Err(e);
            }
            log::warn!("Failed to refresh {}, using stale copy: {}", self.url, e);
        }

        let modified = self
            .store
            .modified(&self.key)
            .await
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if let Some(loaded) = state.as_ref() {
            if loaded.modified == modified {
                return Ok(loaded.entries.clone());
            }
        }

        let contents = self.store.read(&self.key).await?;
        let entries = Arc::new(parse_list(&contents));
        log::debug!("Loaded {} entries from {}", entries.len(), self.key);
        *state = Some(LoadedSet {
            modified,
            entries: entries.clone(),
        });
        Ok(entries)
    }

    /// Must be called with `state` locked.
    async fn refresh_if_stale(&self) -> Result<Freshness, FetchError> {
        if let Some(modified) = self.store.modified(&self.key).await {
            let age = modified.elapsed().unwrap_or_default();
            if age < self.ttl {
                log::debug!("Cached {} is fresh (age {:?})", self.key, age);
                return Ok(Freshness::Fresh);
            }
            log::info!("Cached {} expired (age {:?})", self.key, age);
        } else {
            log::info!("No cached copy of {}", self.key);
        }

        let contents = self.download().await?;
        self.store.write(&self.key, &contents).await?;
        log::info!(
            "Downloaded {} entries from {}",
            contents.lines().filter(|l| !l.trim().is_empty()).count(),
            self.url
        );
        Ok(Freshness::Refreshed)
    }

    async fn download(&self) -> Result<String, FetchError> {
        RetryIf::spawn(
            get_retry_strategy(self.retries),
            || self.fetch_once(),
            |e: &FetchError| {
                let retry = e.is_retryable();
                if retry {
                    log::warn!("Retrying download: {e}");
                }
                retry
            },
        )
        .await
    }

    async fn fetch_once(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&self.url, e))?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                url: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&self.url, e))
    }
}

/// One entry per line; blank lines and `#` comments are ignored.
pub fn parse_list(contents: &str) -> HashSet<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
