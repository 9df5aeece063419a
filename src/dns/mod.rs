//! DNSBL A-record resolution.
//!
//! This module provides the resolver adapter used for every blocklist query:
//! - `LookupOutcome`: found (first address) / not found / error
//! - `DnsLookup`: the async seam the aggregator depends on
//! - `HickoryLookup`: the production implementation over `hickory-resolver`
//!
//! NXDOMAIN is the normal "not listed" answer for a DNSBL. Every other failure
//! (timeout, SERVFAIL, refused, transport errors) is surfaced as an error and
//! never folded into "not listed".

mod lookup;

// Re-export public API
pub use lookup::{lookup_deadline, outcome_from_error, DnsLookup, HickoryLookup, LookupOutcome};

#[cfg(test)]
mod tests;
