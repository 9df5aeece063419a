//! Error type definitions.
//!
//! Validation errors are fatal for a whole check; everything else is scoped to
//! a single service and ends up inside that service's result.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// The target is neither a dotted-quad IPv4 address nor a domain name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Target must be a valid IP address or domain name (got '{target}')")]
pub struct InvalidTargetError {
    /// The rejected input, verbatim.
    pub target: String,
}

/// Errors raised while building a service registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two services share a name.
    #[error("duplicate service name '{0}'")]
    DuplicateName(String),

    /// A zone is not a valid DNS suffix.
    #[error("service '{name}' has an invalid zone '{zone}'")]
    InvalidZone {
        /// Service name.
        name: String,
        /// Offending zone.
        zone: String,
    },
}

/// Errors raised while refreshing or reading a downloaded list.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed with a non-success status code.
    #[error("HTTP request failed for {url}: status {status}")]
    HttpStatus {
        /// URL that was requested.
        url: String,
        /// HTTP status code returned.
        status: u16,
    },

    /// Network error during the HTTP request.
    #[error("network error fetching {url}: {source}")]
    Network {
        /// URL that was requested.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: ReqwestError,
    },

    /// The download did not finish in time.
    #[error("timeout fetching {url}")]
    Timeout {
        /// URL that timed out.
        url: String,
    },

    /// Reading or writing the cached copy failed.
    #[error("cache I/O error for {path:?}: {source}")]
    CacheIo {
        /// Path to the cache entry.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Timeouts, connection failures and 5xx responses are transient; 4xx
    /// responses and local cache failures are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::HttpStatus { status, .. } => *status >= 500,
            FetchError::Network { .. } | FetchError::Timeout { .. } => true,
            FetchError::CacheIo { .. } => false,
        }
    }

    pub(crate) fn from_reqwest(url: &str, err: ReqwestError) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                source: err,
            }
        }
    }
}
