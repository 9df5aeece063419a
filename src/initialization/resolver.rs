//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::{ResolverChoice, DNS_ATTEMPTS};
use crate::error_handling::InitializationError;

/// Nameserver configuration for a resolver choice.
///
/// `System` reads the operating system configuration and falls back to Google
/// Public DNS if that cannot be read.
pub fn resolver_config(choice: ResolverChoice) -> ResolverConfig {
    match choice {
        ResolverChoice::System => match hickory_resolver::system_conf::read_system_conf() {
            Ok((config, _)) => config,
            Err(e) => {
                log::warn!("Could not read system resolver configuration, using Google DNS: {e}");
                ResolverConfig::google()
            }
        },
        ResolverChoice::Google => ResolverConfig::google(),
        ResolverChoice::Cloudflare => ResolverConfig::cloudflare(),
        ResolverChoice::Quad9 => ResolverConfig::quad9(),
    }
}

/// Initializes the DNS resolver for blocklist queries.
///
/// Answers are not cached across runs; within a run the resolver's own cache
/// applies. Queries are fully qualified, so search domains are never appended.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if `timeout` is zero.
pub fn init_resolver(
    choice: ResolverChoice,
    timeout: Duration,
) -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    if timeout.is_zero() {
        return Err(InitializationError::DnsResolverError(
            "timeout must be greater than zero".to_string(),
        ));
    }

    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = DNS_ATTEMPTS;
    opts.ndots = 0;

    log::debug!("Using {choice:?} resolver (timeout {timeout:?})");
    Ok(Arc::new(TokioAsyncResolver::tokio(
        resolver_config(choice),
        opts,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_resolver_public_choices() {
        for choice in [
            ResolverChoice::Google,
            ResolverChoice::Cloudflare,
            ResolverChoice::Quad9,
        ] {
            assert!(init_resolver(choice, Duration::from_secs(2)).is_ok());
        }
    }

    #[tokio::test]
    async fn test_init_resolver_rejects_zero_timeout() {
        let result = init_resolver(ResolverChoice::Google, Duration::ZERO);
        assert!(matches!(
            result,
            Err(InitializationError::DnsResolverError(_))
        ));
    }

    #[test]
    fn test_public_configs_have_nameservers() {
        assert!(!resolver_config(ResolverChoice::Quad9)
            .name_servers()
            .is_empty());
    }
}
