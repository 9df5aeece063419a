//! reputation_check library: DNS blocklist and reputation list lookups
//!
//! This library checks an IPv4 address or domain name against a catalog of
//! DNS-based blocklists (Spamhaus, Barracuda, SpamCop, DroneBL and others)
//! plus the downloadable CINSscore list, and classifies each answer into a
//! per-service result with a human-readable reason.
//!
//! # Example
//!
//! ```no_run
//! use reputation_check::{run_check, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     target: Some("192.0.2.10".to_string()),
//!     category: Some("spam".to_string()),
//!     ..Default::default()
//! };
//!
//! let report = run_check(config).await?;
//! println!("{}", report.overall_line());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod aggregate;
pub mod cached_list;
pub mod classify;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod initialization;
pub mod registry;
pub mod report;
pub mod target;

// Re-export public API
pub use aggregate::{group_by_category, CategoryGroup, CheckSummary, Checker, Handler};
pub use cached_list::{CacheStore, CachedList, FsCacheStore, MemoryCacheStore};
pub use classify::{ClassificationResult, DnsClassifier, ListingStatus, Severity};
pub use config::{Config, LogFormat, LogLevel, OutputFormat, ResolverChoice};
pub use dns::{DnsLookup, HickoryLookup, LookupOutcome};
pub use error_handling::{FetchError, InitializationError, InvalidTargetError, RegistryError};
pub use registry::{BlocklistService, ServiceKind, ServiceRegistry};
pub use report::CheckReport;
pub use run::{build_checker, run_check};
pub use target::{build_lookup_name, validate_target, Target};

// Wiring of configuration into a ready checker
mod run {
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};

    use crate::aggregate::Checker;
    use crate::cached_list::{default_cache_dir, CachedList, FsCacheStore};
    use crate::config::{Config, CINS_CACHE_FILE, DNS_ATTEMPTS};
    use crate::dns::HickoryLookup;
    use crate::initialization::{init_client, init_resolver};
    use crate::registry::ServiceRegistry;
    use crate::report::CheckReport;

    /// Builds a checker over the built-in registry from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolver or HTTP client cannot be created.
    pub fn build_checker(config: &Config) -> Result<Checker> {
        let dns_timeout = Duration::from_secs(config.timeout_seconds);
        let resolver = init_resolver(config.resolver, dns_timeout)
            .context("Failed to initialize DNS resolver")?;
        let client = init_client(Duration::from_secs(config.download_timeout_seconds))
            .context("Failed to initialize HTTP client")?;

        let cache_dir = config.cache_dir.clone().unwrap_or_else(default_cache_dir);
        log::debug!("Using cache directory {}", cache_dir.display());
        let list = CachedList::new(
            config.cins_list_url.clone(),
            CINS_CACHE_FILE,
            client,
            Arc::new(FsCacheStore::new(cache_dir)),
        );

        Ok(Checker::new(
            Arc::new(ServiceRegistry::default()),
            Arc::new(HickoryLookup::for_attempts(
                resolver,
                dns_timeout,
                DNS_ATTEMPTS,
            )),
        )
        .with_cached_list(Arc::new(list))
        .with_max_concurrency(config.max_concurrency))
    }

    /// Checks `config.target` against every configured service.
    ///
    /// Ctrl-C cancels outstanding checks; they are reported as errors and the
    /// partial report is still returned.
    ///
    /// # Errors
    ///
    /// Returns an error if no target was given, the target is invalid, or
    /// initialization fails. Per-service failures never produce an error here.
    pub async fn run_check(config: Config) -> Result<CheckReport> {
        let target = config
            .target
            .clone()
            .context("No target given")?;
        let checker = build_checker(&config)?;

        let cancel = checker.cancel_token();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupted, cancelling outstanding checks");
                cancel.cancel();
            }
        });

        let results = checker
            .check_target(&target, config.category.as_deref())
            .await;
        interrupt.abort();

        let results = results?;
        if results.is_empty() {
            log::warn!(
                "No services match category '{}'",
                config.category.as_deref().unwrap_or_default()
            );
        }
        Ok(CheckReport::new(target, results))
    }
}
