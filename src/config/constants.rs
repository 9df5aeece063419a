//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, cache lifetimes, and list locations.

use std::time::Duration;

/// DNS query timeout in seconds
/// Most DNSBL zones answer in well under a second; 5s leaves room for slow
/// secondaries without letting one zone stall the batch
pub const DNS_TIMEOUT_SECS: u64 = 5;

/// Resolver attempts per query (initial attempt + retries inside hickory)
pub const DNS_ATTEMPTS: usize = 2;

/// Slack added on top of all resolver attempts before a lookup is abandoned
pub const DNS_DEADLINE_MARGIN: Duration = Duration::from_millis(500);

/// Timeout for a bulk list download in seconds
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Default number of services checked concurrently
/// Set to 1 to reproduce a strictly sequential run
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// How long a downloaded list stays fresh before it is fetched again
pub const LIST_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// CINSscore "bad guys" list (one IPv4 address per line)
pub const CINS_LIST_URL: &str = "https://cinsscore.com/list/ci-badguys.txt";

/// File name of the cached CINSscore list inside the cache directory
pub const CINS_CACHE_FILE: &str = "cinsscore_badguys.txt";

/// Sub-directory of the OS cache directory used by this tool
pub const CACHE_DIR_NAME: &str = "reputation_check";

/// User-Agent sent with list downloads
pub const USER_AGENT: &str = concat!("reputation_check/", env!("CARGO_PKG_VERSION"));

// Download retry strategy
/// Initial delay in milliseconds before the first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 250;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 5;
/// Number of retries after the initial download attempt
pub const RETRY_MAX_RETRIES: usize = 2;

/// Address Spamhaus answers with when a query is refused (public resolver or quota)
pub const SPAMHAUS_RATE_LIMIT_ADDR: std::net::Ipv4Addr = std::net::Ipv4Addr::new(127, 255, 255, 254);
