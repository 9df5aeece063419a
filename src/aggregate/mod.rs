//! Runs every selected service against one target and collects the results.
//!
//! Each service check is its own task, so a panic or failure in one handler
//! turns into a single error entry instead of aborting the whole check.
//! Results always come back in registry order regardless of completion order.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::cached_list::CachedList;
use crate::classify::{ClassificationResult, DnsClassifier};
use crate::config::DEFAULT_MAX_CONCURRENCY;
use crate::dns::DnsLookup;
use crate::error_handling::InvalidTargetError;
use crate::registry::{BlocklistService, ServiceKind, ServiceRegistry};
use crate::target::{build_lookup_name, validate_target, Target};

/// How one service is checked.
#[derive(Clone)]
pub enum Handler {
    /// DNS query under the service zone, interpreted by the classifier.
    Dns(DnsClassifier),
    /// Membership in a downloaded list.
    List(Arc<CachedList>),
}

/// Checks targets against a registry of services.
pub struct Checker {
    registry: Arc<ServiceRegistry>,
    resolver: Arc<dyn DnsLookup>,
    handlers: HashMap<String, Handler>,
    max_concurrency: usize,
    cancel: CancellationToken,
}

impl Checker {
    /// Builds DNS handlers for every service that has one.
    ///
    /// List-backed services stay without a handler until a list is supplied
    /// through [`Checker::with_cached_list`]; checking them before that yields
    /// an error entry.
    pub fn new(registry: Arc<ServiceRegistry>, resolver: Arc<dyn DnsLookup>) -> Self {
        let handlers = registry
            .iter()
            .filter_map(|service| {
                DnsClassifier::for_kind(service.kind)
                    .map(|classifier| (service.name.clone(), Handler::Dns(classifier)))
            })
            .collect();

        Self {
            registry,
            resolver,
            handlers,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            cancel: CancellationToken::new(),
        }
    }

    /// Uses `list` for every CINSscore-kind service.
    pub fn with_cached_list(mut self, list: Arc<CachedList>) -> Self {
        for service in self.registry.iter() {
            if service.kind == ServiceKind::CinsScore {
                self.handlers
                    .insert(service.name.clone(), Handler::List(list.clone()));
            }
        }
        self
    }

    /// Upper bound on services checked at once. `1` checks sequentially.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Token that aborts in-flight checks when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Checks `target` against every service, or only those in `category`.
    ///
    /// An unknown category selects no services and yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTargetError` before any query is issued if `target` is
    /// neither an IPv4 address nor a domain name.
    pub async fn check_target(
        &self,
        target: &str,
        category: Option<&str>,
    ) -> Result<Vec<ClassificationResult>, InvalidTargetError> {
        let target = validate_target(target)?;
        let services: Vec<BlocklistService> = self.registry.filter(category).cloned().collect();
        log::info!("Checking {} against {} services", target, services.len());

        let checks = services.into_iter().map(|service| {
            let handler = self.handlers.get(&service.name).cloned();
            let resolver = Arc::clone(&self.resolver);
            let target = target.clone();
            let cancel = self.cancel.clone();
            async move { spawn_check(service, handler, resolver, target, cancel).await }
        });

        let results: Vec<ClassificationResult> = stream::iter(checks)
            .buffered(self.max_concurrency)
            .collect()
            .await;

        log::info!(
            "{} of {} services list {}",
            results.iter().filter(|r| r.is_listed()).count(),
            results.len(),
            target
        );
        Ok(results)
    }
}

async fn spawn_check(
    service: BlocklistService,
    handler: Option<Handler>,
    resolver: Arc<dyn DnsLookup>,
    target: Target,
    cancel: CancellationToken,
) -> ClassificationResult {
    let Some(handler) = handler else {
        log::error!("No handler configured for {}", service.name);
        return ClassificationResult::failed(&service, "no handler configured");
    };

    let task_service = service.clone();
    let task = tokio::spawn(async move {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => ClassificationResult::failed(&task_service, "check cancelled"),
            result = run_handler(&handler, resolver.as_ref(), &task_service, &target) => result,
        }
    });

    match task.await {
        Ok(result) => result,
        Err(join_error) => {
            log::warn!("Check for {} panicked: {:?}", service.name, join_error);
            ClassificationResult::failed(&service, "internal error while checking")
        }
    }
}

async fn run_handler(
    handler: &Handler,
    resolver: &dyn DnsLookup,
    service: &BlocklistService,
    target: &Target,
) -> ClassificationResult {
    match handler {
        Handler::Dns(classifier) => {
            let name = build_lookup_name(target, &service.zone);
            log::debug!("{}: querying {}", service.name, name);
            let outcome = resolver.resolve_a(&name).await;
            classifier.classify(service, &outcome)
        }
        Handler::List(list) => list.check(service, target).await,
    }
}

/// Results of one category, in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub results: Vec<ClassificationResult>,
}

impl CategoryGroup {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn listed(&self) -> usize {
        self.results.iter().filter(|r| r.is_listed()).count()
    }

    pub fn not_listed(&self) -> usize {
        self.total() - self.listed()
    }
}

/// Groups results by category, keeping first-appearance order of categories.
pub fn group_by_category(results: &[ClassificationResult]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for result in results {
        match groups.iter_mut().find(|g| g.category == result.category) {
            Some(group) => group.results.push(result.clone()),
            None => groups.push(CategoryGroup {
                category: result.category.clone(),
                results: vec![result.clone()],
            }),
        }
    }
    groups
}

/// Totals across all results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub total: usize,
    pub listed: usize,
    pub errors: usize,
}

impl CheckSummary {
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        Self {
            total: results.len(),
            listed: results.iter().filter(|r| r.is_listed()).count(),
            errors: results.iter().filter(|r| r.is_error()).count(),
        }
    }
}
