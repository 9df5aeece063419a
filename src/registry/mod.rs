//! Blocklist service catalog.
//!
//! The registry is built once at startup and shared read-only by every check.
//! Each service names the zone it is queried under, a free-text category used
//! for grouping and filtering, and the `ServiceKind` that decides how its
//! answers are interpreted.

use std::collections::HashSet;

use serde::Serialize;
use strum_macros::Display;

use crate::error_handling::RegistryError;
use crate::target::is_valid_domain;

/// How a service's answers are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// Any A record means listed.
    Generic,
    Spamhaus,
    Barracuda,
    SpamCop,
    DroneBl,
    BlocklistDe,
    SpamRats,
    Mailspike,
    Hostkarma,
    /// Membership in the downloaded CINSscore list; no DNS query.
    CinsScore,
}

/// Static descriptor of one blocklist service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlocklistService {
    /// Unique identifier.
    pub name: String,
    /// DNS suffix queried under.
    pub zone: String,
    pub description: String,
    /// Grouping key, e.g. `spam` or `botnet`.
    pub category: String,
    pub kind: ServiceKind,
}

impl BlocklistService {
    pub fn new(
        name: impl Into<String>,
        zone: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        kind: ServiceKind,
    ) -> Self {
        Self {
            name: name.into(),
            zone: zone.into(),
            description: description.into(),
            category: category.into(),
            kind,
        }
    }

    /// Whether the service needs logic beyond "any answer means listed".
    pub fn requires_special_handling(&self) -> bool {
        self.kind != ServiceKind::Generic
    }
}

/// Ordered, validated set of services.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    services: Vec<BlocklistService>,
}

impl ServiceRegistry {
    /// Builds a registry, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` if two services share a name or a zone is not
    /// a valid domain suffix.
    pub fn new(services: Vec<BlocklistService>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for service in &services {
            if !seen.insert(service.name.as_str()) {
                return Err(RegistryError::DuplicateName(service.name.clone()));
            }
            if !is_valid_domain(&service.zone) {
                return Err(RegistryError::InvalidZone {
                    name: service.name.clone(),
                    zone: service.zone.clone(),
                });
            }
        }
        Ok(Self { services })
    }

    /// Services in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &BlocklistService> {
        self.services.iter()
    }

    /// Services whose category equals `category`, or all of them when `None`.
    pub fn filter<'a>(
        &'a self,
        category: Option<&'a str>,
    ) -> impl Iterator<Item = &'a BlocklistService> + 'a {
        self.services
            .iter()
            .filter(move |s| category.is_none_or(|c| s.category == c))
    }

    pub fn get(&self, name: &str) -> Option<&BlocklistService> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.services
            .iter()
            .map(|s| s.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for ServiceRegistry {
    /// The built-in catalog.
    fn default() -> Self {
        use ServiceKind::*;

        let services = vec![
            BlocklistService::new(
                "spamhaus",
                "zen.spamhaus.org",
                "Spamhaus ZEN (includes SBL, XBL, and PBL)",
                "spam",
                Spamhaus,
            ),
            BlocklistService::new(
                "barracuda",
                "b.barracudacentral.org",
                "Barracuda Reputation Block List",
                "spam",
                Barracuda,
            ),
            BlocklistService::new(
                "spamcop",
                "bl.spamcop.net",
                "SpamCop Blocking List",
                "spam",
                SpamCop,
            ),
            BlocklistService::new(
                "dronebl",
                "dnsbl.dronebl.org",
                "DroneBL (Botnet Detection)",
                "botnet",
                DroneBl,
            ),
            BlocklistService::new(
                "tor",
                "tor.dan.me.uk",
                "Tor Exit Node List",
                "anonymization",
                Generic,
            ),
            BlocklistService::new(
                "blocklist_de",
                "bl.blocklist.de",
                "Blocklist.de (Scanner/Probe Detection)",
                "scanner",
                BlocklistDe,
            ),
            BlocklistService::new(
                "cinsscore",
                "cinsscore.com",
                "CINSscore (Bad IPs)",
                "badips",
                CinsScore,
            ),
            BlocklistService::new(
                "swinog (dnsrbl)",
                "dnsrbl.swinog.ch",
                "Realtime blacklist assembled by spamtraps",
                "spam",
                Generic,
            ),
            BlocklistService::new(
                "swinog (spamrbl)",
                "spamrbl.swinog.ch",
                "IP-adresses from catched spammails",
                "spam",
                Generic,
            ),
            BlocklistService::new(
                "swinog (uribl)",
                "uribl.swinog.ch",
                "Realtime blacklist built from spamtrap sources",
                "spam",
                Generic,
            ),
            BlocklistService::new(
                "lashback",
                "blacklist.lashback.com",
                "world's largest unsubscribe intelligence database",
                "spam",
                Generic,
            ),
            BlocklistService::new(
                "spamrats",
                "all.spamrats.com",
                "Spamrats ALL",
                "badips",
                SpamRats,
            ),
            BlocklistService::new(
                "mailspike",
                "bl.mailspike.net",
                "Mailspike Reputation Service",
                "reputation",
                Mailspike,
            ),
            BlocklistService::new(
                "sem-backscatter",
                "backscatter.spameatingmonkey.net",
                "SpamEatingMonkey Backscatter",
                "spam",
                Generic,
            ),
            BlocklistService::new(
                "sem-black",
                "bl.spameatingmonkey.net",
                "SpamEatingMonkey Black",
                "spam",
                Generic,
            ),
            BlocklistService::new(
                "psbl-surriel",
                "psbl.surriel.com",
                "Passive Spam Block List",
                "spam",
                Generic,
            ),
            BlocklistService::new(
                "hostkarma",
                "hostkarma.junkemailfilter.com",
                "Hostkarma (Junk Email Filter)",
                "reputation",
                Hostkarma,
            ),
        ];

        // The built-in catalog has unique names and valid zones (see tests).
        Self { services }
    }
}
