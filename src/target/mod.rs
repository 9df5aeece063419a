//! Target validation and DNSBL query name construction.
//!
//! A target is either a dotted-quad IPv4 address or a domain name. IPv4
//! targets are queried in reverse-octet form (`1.2.3.4` under `zone` becomes
//! `4.3.2.1.zone`); domains are queried as-is under the zone.

use std::fmt;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::InvalidTargetError;

/// One or more labels (1-63 chars, alphanumeric with internal hyphens)
/// followed by an alphabetic TLD of at least two characters.
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,63}$")
        .expect("domain pattern is a valid regex")
});

/// Longest presentation-format name DNS allows.
const MAX_DOMAIN_LEN: usize = 253;

/// A validated lookup target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// An IPv4 address, queried in reverse-octet form.
    Ipv4(Ipv4Addr),
    /// A domain name, queried verbatim under the zone.
    Domain(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Ipv4(ip) => write!(f, "{ip}"),
            Target::Domain(domain) => f.write_str(domain),
        }
    }
}

/// Parses `s` as four dot-separated decimal octets.
///
/// Unlike `Ipv4Addr::from_str`, leading zeros are accepted (`010` is 10) so
/// that inputs like `192.168.001.010` are treated as addresses rather than
/// rejected outright.
fn parse_ipv4(s: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut count = 0;
    for part in s.split('.') {
        if count == 4
            || part.is_empty()
            || part.len() > 3
            || !part.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        octets[count] = part.parse::<u8>().ok()?;
        count += 1;
    }
    (count == 4).then(|| Ipv4Addr::from(octets))
}

/// Returns true if `s` is exactly four dot-separated integers in `[0, 255]`.
pub fn is_valid_ipv4(s: &str) -> bool {
    parse_ipv4(s).is_some()
}

/// Returns true if `s` is a syntactically valid domain name with an
/// alphabetic TLD.
pub fn is_valid_domain(s: &str) -> bool {
    !s.is_empty() && s.len() <= MAX_DOMAIN_LEN && DOMAIN_PATTERN.is_match(s)
}

/// Validates a raw target string.
///
/// This is the only gate in front of DNS: nothing is queried for a target
/// that fails here.
///
/// # Errors
///
/// Returns `InvalidTargetError` if `s` is neither an IPv4 address nor a
/// domain name.
pub fn validate_target(s: &str) -> Result<Target, InvalidTargetError> {
    if let Some(ip) = parse_ipv4(s) {
        return Ok(Target::Ipv4(ip));
    }
    if is_valid_domain(s) {
        return Ok(Target::Domain(s.to_string()));
    }
    Err(InvalidTargetError {
        target: s.to_string(),
    })
}

/// Reverses the octets of an IPv4 address (`1.2.3.4` -> `4.3.2.1`).
pub fn reverse_ipv4(ip: &Ipv4Addr) -> String {
    let [a, b, c, d] = ip.octets();
    format!("{d}.{c}.{b}.{a}")
}

/// Builds the DNSBL query name for `target` under `zone`.
pub fn build_lookup_name(target: &Target, zone: &str) -> String {
    match target {
        Target::Ipv4(ip) => format!("{}.{}", reverse_ipv4(ip), zone),
        Target::Domain(domain) => format!("{domain}.{zone}"),
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
