//! Per-service check results.

use std::net::Ipv4Addr;

use serde::Serialize;
use strum_macros::Display;

use crate::registry::BlocklistService;

/// Whether a service lists the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum ListingStatus {
    Listed,
    #[strum(serialize = "Not Listed")]
    #[serde(rename = "Not Listed")]
    NotListed,
}

/// Traffic-light severity used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Red,
    Yellow,
    Green,
}

/// Outcome of checking one target against one service.
///
/// The resolved address and the matched return-code label are carried as
/// structured fields; `details` is only the human-readable sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub service_name: String,
    pub description: String,
    pub category: String,
    pub status: ListingStatus,
    /// Service-specific severity, if the service defines one.
    pub severity: Option<Severity>,
    pub details: String,
    /// Address returned by the zone, if any.
    pub return_ip: Option<Ipv4Addr>,
    /// Label of the matched return code, if the address is a known code.
    pub reason: Option<String>,
    /// The service refused to answer (quota or blocked resolver).
    pub rate_limited: bool,
    /// Set when the check itself failed; the status is then `NotListed`.
    pub error: Option<String>,
}

impl ClassificationResult {
    pub fn new(service: &BlocklistService, status: ListingStatus, details: impl Into<String>) -> Self {
        Self {
            service_name: service.name.clone(),
            description: service.description.clone(),
            category: service.category.clone(),
            status,
            severity: None,
            details: details.into(),
            return_ip: None,
            reason: None,
            rate_limited: false,
            error: None,
        }
    }

    /// Plain "Not listed" result.
    pub fn not_listed(service: &BlocklistService) -> Self {
        Self::new(service, ListingStatus::NotListed, "Not listed")
    }

    /// Degraded result for a failed check. Never reported as listed.
    pub fn failed(service: &BlocklistService, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut result = Self::new(
            service,
            ListingStatus::NotListed,
            format!("Error: {message}"),
        );
        result.error = Some(message);
        result
    }

    pub fn with_return_ip(mut self, ip: Ipv4Addr) -> Self {
        self.return_ip = Some(ip);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn is_listed(&self) -> bool {
        self.status == ListingStatus::Listed
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Severity to show: the service-specific one when set, otherwise red for
    /// listed, yellow for errors and rate limits, green for clean.
    pub fn display_severity(&self) -> Severity {
        if let Some(severity) = self.severity {
            return severity;
        }
        if self.is_error() || self.rate_limited {
            Severity::Yellow
        } else if self.is_listed() {
            Severity::Red
        } else {
            Severity::Green
        }
    }
}
