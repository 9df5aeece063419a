// Shared test helpers: a scripted resolver standing in for DNS.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;

use async_trait::async_trait;
use reputation_check::{DnsLookup, LookupOutcome};

/// Resolver that answers from a fixed table. Unlisted names are NXDOMAIN.
#[derive(Default)]
pub struct ScriptedLookup {
    answers: HashMap<String, LookupOutcome>,
    pub queried: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listed(mut self, name: &str, addr: [u8; 4]) -> Self {
        self.answers
            .insert(name.to_string(), LookupOutcome::Found(Ipv4Addr::from(addr)));
        self
    }

    #[allow(dead_code)] // Used by other test files
    pub fn failing(mut self, name: &str, message: &str) -> Self {
        self.answers
            .insert(name.to_string(), LookupOutcome::Error(message.to_string()));
        self
    }
}

#[async_trait]
impl DnsLookup for ScriptedLookup {
    async fn resolve_a(&self, name: &str) -> LookupOutcome {
        self.queried.lock().unwrap().push(name.to_string());
        self.answers
            .get(name)
            .cloned()
            .unwrap_or(LookupOutcome::NotFound)
    }
}
