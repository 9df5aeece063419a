//! Per-service interpretation of DNSBL answers.

use std::net::Ipv4Addr;

use crate::config::SPAMHAUS_RATE_LIMIT_ADDR;
use crate::dns::LookupOutcome;
use crate::registry::{BlocklistService, ServiceKind};

use super::codes::{self, CodeTable};
use super::result::{ClassificationResult, ListingStatus, Severity};

/// One variant per family of DNS-queried services.
///
/// Every variant shares the same skeleton (NXDOMAIN is clean, errors degrade
/// to an error result, unknown codes are "Listed") and differs only in how a
/// returned address is labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DnsClassifier {
    Generic,
    Spamhaus,
    Barracuda,
    SpamCop,
    DroneBl,
    BlocklistDe,
    SpamRats,
    Mailspike,
    Hostkarma,
}

impl DnsClassifier {
    /// Classifier for a service kind; `None` for kinds that are not answered
    /// over DNS.
    pub fn for_kind(kind: ServiceKind) -> Option<Self> {
        Some(match kind {
            ServiceKind::Generic => DnsClassifier::Generic,
            ServiceKind::Spamhaus => DnsClassifier::Spamhaus,
            ServiceKind::Barracuda => DnsClassifier::Barracuda,
            ServiceKind::SpamCop => DnsClassifier::SpamCop,
            ServiceKind::DroneBl => DnsClassifier::DroneBl,
            ServiceKind::BlocklistDe => DnsClassifier::BlocklistDe,
            ServiceKind::SpamRats => DnsClassifier::SpamRats,
            ServiceKind::Mailspike => DnsClassifier::Mailspike,
            ServiceKind::Hostkarma => DnsClassifier::Hostkarma,
            ServiceKind::CinsScore => return None,
        })
    }

    fn table(self) -> Option<CodeTable> {
        match self {
            DnsClassifier::Generic | DnsClassifier::DroneBl => None,
            DnsClassifier::Spamhaus => Some(codes::SPAMHAUS),
            DnsClassifier::Barracuda => Some(codes::BARRACUDA),
            DnsClassifier::SpamCop => Some(codes::SPAMCOP),
            DnsClassifier::BlocklistDe => Some(codes::BLOCKLIST_DE),
            DnsClassifier::SpamRats => Some(codes::SPAMRATS),
            DnsClassifier::Mailspike => Some(codes::MAILSPIKE),
            DnsClassifier::Hostkarma => Some(codes::HOSTKARMA),
        }
    }

    /// Label for a returned address, if this service defines one.
    pub fn reason(self, addr: Ipv4Addr) -> Option<&'static str> {
        match self {
            DnsClassifier::DroneBl => Some(codes::dronebl_threat(addr.octets()[3])),
            other => other.table().and_then(|t| codes::lookup(t, addr)),
        }
    }

    /// Service-specific severity for a returned address.
    pub fn severity(self, addr: Ipv4Addr) -> Option<Severity> {
        match self {
            DnsClassifier::Hostkarma => match addr.octets() {
                [127, 0, 0, 2] | [127, 0, 0, 4] => Some(Severity::Red),
                [127, 0, 0, 3] => Some(Severity::Yellow),
                [127, 0, 0, 1] | [127, 0, 0, 5] => Some(Severity::Green),
                _ => None,
            },
            _ => None,
        }
    }

    /// Turns a lookup outcome into a result for `service`.
    pub fn classify(
        self,
        service: &BlocklistService,
        outcome: &LookupOutcome,
    ) -> ClassificationResult {
        let addr = match outcome {
            LookupOutcome::NotFound => return ClassificationResult::not_listed(service),
            LookupOutcome::Error(e) => return ClassificationResult::failed(service, e.clone()),
            LookupOutcome::Found(addr) => *addr,
        };

        if self == DnsClassifier::Spamhaus && addr == SPAMHAUS_RATE_LIMIT_ADDR {
            log::warn!(
                "{} refused the query (rate limited or public resolver)",
                service.name
            );
            let mut result = ClassificationResult::new(
                service,
                ListingStatus::NotListed,
                "Query blocked or rate-limited",
            )
            .with_return_ip(addr);
            result.rate_limited = true;
            return result;
        }

        let details = match (self, self.reason(addr)) {
            (DnsClassifier::DroneBl, Some(threat)) => format!(
                "{threat} (Code: {}, Return IP: {addr})",
                addr.octets()[3]
            ),
            (DnsClassifier::SpamRats, Some(label)) => {
                format!("Listed in {label} (Return IP: {addr})")
            }
            (_, Some(label)) => format!("{label} (Return IP: {addr})"),
            (_, None) => format!("Listed (Return IP: {addr})"),
        };

        let mut result = ClassificationResult::new(service, ListingStatus::Listed, details)
            .with_return_ip(addr);
        if let Some(reason) = self.reason(addr) {
            result = result.with_reason(reason);
        }
        if let Some(severity) = self.severity(addr) {
            result = result.with_severity(severity);
        }
        result
    }
}
