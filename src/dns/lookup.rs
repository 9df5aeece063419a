//! Resolver adapter and outcome classification.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::TokioAsyncResolver;

use crate::config::DNS_DEADLINE_MARGIN;

/// Result of a single A-record query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The name resolved; only the first address is significant.
    Found(Ipv4Addr),
    /// The name does not exist.
    NotFound,
    /// Any other failure, with a human-readable message.
    Error(String),
}

/// Abstract A-record resolver for mocking and switching implementations.
#[async_trait]
pub trait DnsLookup: Send + Sync {
    /// Resolves `name` to its first A record.
    async fn resolve_a(&self, name: &str) -> LookupOutcome;
}

/// Maps a resolver error onto a lookup outcome.
///
/// NXDOMAIN and NODATA both mean the zone holds no record for the name, which
/// is how a DNSBL says "not listed". Everything else is an error.
pub fn outcome_from_error(err: &ResolveError) -> LookupOutcome {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. }
            if matches!(*response_code, ResponseCode::NXDomain | ResponseCode::NoError) =>
        {
            LookupOutcome::NotFound
        }
        _ => LookupOutcome::Error(err.to_string()),
    }
}

/// `DnsLookup` backed by a shared hickory resolver.
///
/// Each query is additionally bounded by `timeout` so a misbehaving upstream
/// can never hang a check. The bound covers the whole lookup, retries
/// included, so it must not be shorter than the resolver's own attempts.
#[derive(Clone)]
pub struct HickoryLookup {
    resolver: Arc<TokioAsyncResolver>,
    timeout: Duration,
}

impl HickoryLookup {
    /// Wraps `resolver`, bounding every query by `timeout`.
    pub fn new(resolver: Arc<TokioAsyncResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    /// Wraps a resolver configured with `attempts` tries of `per_attempt`
    /// each, leaving room for all of them to run.
    pub fn for_attempts(
        resolver: Arc<TokioAsyncResolver>,
        per_attempt: Duration,
        attempts: usize,
    ) -> Self {
        Self::new(resolver, lookup_deadline(per_attempt, attempts))
    }
}

/// Overall deadline for a lookup made of `attempts` tries of `per_attempt`.
pub fn lookup_deadline(per_attempt: Duration, attempts: usize) -> Duration {
    let attempts = u32::try_from(attempts.max(1)).unwrap_or(u32::MAX);
    per_attempt.saturating_mul(attempts) + DNS_DEADLINE_MARGIN
}

#[async_trait]
impl DnsLookup for HickoryLookup {
    async fn resolve_a(&self, name: &str) -> LookupOutcome {
        // Fully qualify so search domains are never appended.
        let fqdn = if name.ends_with('.') {
            name.to_string()
        } else {
            format!("{name}.")
        };

        match tokio::time::timeout(self.timeout, self.resolver.ipv4_lookup(fqdn.as_str())).await {
            Ok(Ok(lookup)) => match lookup.iter().next() {
                Some(a) => {
                    log::debug!("{name} -> {}", a.0);
                    LookupOutcome::Found(a.0)
                }
                None => LookupOutcome::NotFound,
            },
            Ok(Err(e)) => {
                let outcome = outcome_from_error(&e);
                if let LookupOutcome::Error(ref msg) = outcome {
                    log::warn!("DNS lookup error for {name}: {msg}");
                } else {
                    log::debug!("{name} does not exist");
                }
                outcome
            }
            Err(_) => {
                log::warn!("DNS lookup for {name} timed out after {:?}", self.timeout);
                LookupOutcome::Error(format!("DNS lookup timed out after {:?}", self.timeout))
            }
        }
    }
}
