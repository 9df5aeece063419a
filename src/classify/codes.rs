//! Return-code tables.
//!
//! Addresses are in 127.0.0.0/8 by DNSBL convention. DroneBL is keyed by the
//! last octet only; everything else is matched on the full address.

use std::net::Ipv4Addr;

const fn lo(last: u8) -> Ipv4Addr {
    Ipv4Addr::new(127, 0, 0, last)
}

pub(crate) type CodeTable = &'static [(Ipv4Addr, &'static str)];

pub(crate) const SPAMHAUS: CodeTable = &[
    (lo(2), "SBL (General spam source)"),
    (lo(3), "PBL (Policy Block List)"),
    (lo(4), "XBL (Compromised or infected machine)"),
    (lo(5), "PBL (Policy Block List)"),
    (lo(6), "SBL and XBL"),
    (lo(7), "SBL, XBL, and PBL"),
    (lo(9), "SBL and PBL"),
    (lo(10), "XBL (Other exploit activities)"),
    (lo(11), "PBL (Spamhaus maintained)"),
];

pub(crate) const BARRACUDA: CodeTable = &[(lo(2), "General spam source")];

pub(crate) const SPAMCOP: CodeTable = &[(lo(2), "General spam source")];

pub(crate) const DRONEBL: &[(u8, &str)] = &[
    (2, "Sample"),
    (3, "IRC Drone"),
    (5, "Bottler"),
    (6, "Unknown spambot or drone"),
    (7, "DDOS Drone"),
    (8, "SOCKS Proxy"),
    (9, "HTTP Proxy"),
    (10, "ProxyChain"),
    (11, "Web Page Proxy"),
    (12, "Open DNS Resolver"),
    (13, "Brute force attackers"),
    (14, "Open Wingate Proxy"),
    (15, "Compromised router / gateway"),
    (16, "Autorooting worms"),
    (17, "Automatically determined botnet IPs (experimental)"),
    (18, "DNS/MX type hostname detected on IRC"),
    (255, "Unknown"),
];

pub(crate) const DRONEBL_UNKNOWN: &str = "Unknown Threat Type";

pub(crate) const BLOCKLIST_DE: CodeTable = &[
    (lo(2), "amavis"),
    (lo(3), "apacheddos"),
    (lo(4), "asterisk"),
    (lo(5), "badbot"),
    (lo(6), "ftp"),
    (lo(7), "imap"),
    (lo(8), "ircbot"),
    (lo(9), "mail"),
    (lo(10), "pop3"),
    (lo(11), "regbot"),
    (lo(12), "rfi-attack"),
    (lo(13), "sasl"),
    (lo(14), "ssh"),
    (lo(15), "w00tw00t"),
    (lo(16), "portflood"),
    (lo(17), "sql-injection"),
    (lo(18), "webmin"),
    (lo(19), "trigger-spam"),
    (lo(20), "manuall"),
    (lo(21), "bruteforcelogin"),
    (lo(22), "mysql"),
];

pub(crate) const SPAMRATS: CodeTable = &[
    (lo(36), "RATS-Dyna"),
    (lo(37), "RATS-NoPtr"),
    (lo(38), "RATS-Spam"),
    (lo(43), "RATS-Auth"),
];

pub(crate) const MAILSPIKE: CodeTable = &[
    (lo(10), "L5 - Worst possible reputation"),
    (lo(11), "L4 - Very bad reputation"),
    (lo(12), "L3 - Bad reputation"),
    (lo(13), "L2 - Suspicious behavior reputation"),
    (lo(14), "L1 - Neutral - Probably spam"),
    (lo(15), "LHO - Neutral"),
    (lo(16), "H1 - Neutral - Probably legit"),
    (lo(17), "H2 - Possible legit sender"),
    (lo(18), "H3 - Good Reputation"),
    (lo(19), "H4 - Very Good Reputation"),
    (lo(20), "H5 - Excellent Reputation"),
];

pub(crate) const HOSTKARMA: CodeTable = &[
    (lo(1), "Whitelist - Trusted nonspam"),
    (lo(2), "Blacklist - Block spam"),
    (lo(3), "Yellowlist - Mix of spam and nonspam"),
    (lo(4), "Brownlist - All spam, but not yet enough to blacklist"),
    (lo(5), "NOBL - IP is not a spam only source"),
];

pub(crate) fn lookup(table: CodeTable, addr: Ipv4Addr) -> Option<&'static str> {
    table
        .iter()
        .find_map(|(code, label)| (*code == addr).then_some(*label))
}

pub(crate) fn dronebl_threat(code: u8) -> &'static str {
    DRONEBL
        .iter()
        .find_map(|(c, label)| (*c == code).then_some(*label))
        .unwrap_or(DRONEBL_UNKNOWN)
}
