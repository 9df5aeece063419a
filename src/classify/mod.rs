//! Response classification.
//!
//! Maps the address a blocklist zone returns to a listing status and a
//! human-readable reason. Per-service return-code tables live in `codes`;
//! `DnsClassifier` is a closed set of variants, one per service family.

mod classifier;
mod codes;
mod result;

// Re-export public API
pub use classifier::DnsClassifier;
pub use result::{ClassificationResult, ListingStatus, Severity};
