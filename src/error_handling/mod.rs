//! Error types and retry strategy.
//!
//! This module provides:
//! - Error type definitions for initialization, validation and list fetching
//! - The exponential backoff strategy used for list downloads
//!
//! Only target validation aborts a check. Resolution and fetch failures are
//! local to one service and are folded into that service's result.

mod types;

use std::time::Duration;

use tokio_retry::strategy::ExponentialBackoff;

// Re-export public API
pub use types::{FetchError, InitializationError, InvalidTargetError, RegistryError};

/// Creates an exponential backoff retry strategy for list downloads.
///
/// Returns a retry strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Backoff factor: `RETRY_FACTOR`
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - At most `retries` retries after the initial attempt
pub fn get_retry_strategy(retries: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(retries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_strategy_is_bounded() {
        assert_eq!(get_retry_strategy(2).count(), 2);
        assert_eq!(get_retry_strategy(0).count(), 0);
    }

    #[test]
    fn test_retry_strategy_respects_max_delay() {
        let max = Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS);
        for delay in get_retry_strategy(10) {
            assert!(delay <= max, "delay {:?} exceeds max {:?}", delay, max);
        }
    }
}
