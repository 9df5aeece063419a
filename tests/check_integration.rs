//! End-to-end checks over the built-in registry with a scripted resolver.

mod helpers;

use std::sync::Arc;
use std::time::SystemTime;

use helpers::ScriptedLookup;
use reputation_check::{
    CacheStore, CachedList, CheckReport, Checker, ListingStatus, MemoryCacheStore, ServiceRegistry,
    Severity,
};

fn checker(lookup: ScriptedLookup) -> Checker {
    let store = Arc::new(MemoryCacheStore::new());
    store.insert("cins.txt", "# bad guys\n192.0.2.1\n", SystemTime::now());
    let store: Arc<dyn CacheStore> = store;
    let list = CachedList::new(
        "http://127.0.0.1:9/ci-badguys.txt",
        "cins.txt",
        reqwest::Client::new(),
        store,
    );
    Checker::new(Arc::new(ServiceRegistry::default()), Arc::new(lookup))
        .with_cached_list(Arc::new(list))
}

#[tokio::test]
async fn test_every_service_reports_once_in_registry_order() {
    let registry = ServiceRegistry::default();
    let results = checker(ScriptedLookup::new())
        .check_target("198.51.100.7", None)
        .await
        .unwrap();

    let got: Vec<_> = results.iter().map(|r| r.service_name.clone()).collect();
    let expected: Vec<_> = registry.iter().map(|s| s.name.clone()).collect();
    assert_eq!(got, expected);
    assert!(results.iter().all(|r| r.status == ListingStatus::NotListed));
}

#[tokio::test]
async fn test_listed_address_across_services() {
    let lookup = ScriptedLookup::new()
        .listed("1.2.0.192.zen.spamhaus.org", [127, 0, 0, 4])
        .listed("1.2.0.192.hostkarma.junkemailfilter.com", [127, 0, 0, 2])
        .listed("1.2.0.192.tor.dan.me.uk", [127, 0, 0, 100])
        .failing("1.2.0.192.bl.spamcop.net", "SERVFAIL");

    let results = checker(lookup).check_target("192.0.2.1", None).await.unwrap();
    let by_name = |name: &str| results.iter().find(|r| r.service_name == name).unwrap();

    let spamhaus = by_name("spamhaus");
    assert!(spamhaus.is_listed());
    assert_eq!(spamhaus.reason.as_deref(), Some("XBL (Compromised or infected machine)"));

    let hostkarma = by_name("hostkarma");
    assert_eq!(hostkarma.display_severity(), Severity::Red);

    assert_eq!(by_name("tor").details, "Listed (Return IP: 127.0.0.100)");
    assert_eq!(by_name("spamcop").details, "Error: SERVFAIL");
    assert_eq!(by_name("cinsscore").details, "Listed in bad-guys list");

    let report = CheckReport::new("192.0.2.1", results.clone());
    assert_eq!(report.summary.listed, 4);
    assert_eq!(report.summary.errors, 1);
    assert_eq!(
        report.overall_line(),
        "Found 4 out of 17 services listing the target"
    );
}

#[tokio::test]
async fn test_spam_category_only_queries_spam_zones() {
    let lookup = Arc::new(ScriptedLookup::new());
    let checker = Checker::new(Arc::new(ServiceRegistry::default()), lookup.clone());

    let results = checker
        .check_target("example.com", Some("spam"))
        .await
        .unwrap();
    assert_eq!(results.len(), 10);
    assert!(results.iter().all(|r| r.category == "spam"));

    let queried = lookup.queried.lock().unwrap();
    assert_eq!(queried.len(), 10);
    assert!(queried.contains(&"example.com.zen.spamhaus.org".to_string()));
}

#[tokio::test]
async fn test_invalid_target_is_rejected() {
    let err = checker(ScriptedLookup::new())
        .check_target("999.1.1.1", None)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Target must be a valid IP address or domain name (got '999.1.1.1')"
    );
}
