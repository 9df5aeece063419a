use std::net::Ipv4Addr;

use super::*;
use crate::classify::ListingStatus;
use crate::registry::{BlocklistService, ServiceKind};

fn service(name: &str, category: &str) -> BlocklistService {
    BlocklistService::new(name, "zone.example.org", format!("{name} list"), category, ServiceKind::Generic)
}

fn sample_results() -> Vec<ClassificationResult> {
    vec![
        ClassificationResult::new(
            &service("spamhaus", "spam"),
            ListingStatus::Listed,
            "SBL - Spamhaus SBL Data (Return IP: 127.0.0.2)",
        )
        .with_return_ip(Ipv4Addr::new(127, 0, 0, 2))
        .with_reason("SBL - Spamhaus SBL Data"),
        ClassificationResult::not_listed(&service("spamcop", "spam")),
        ClassificationResult::failed(&service("dronebl", "botnet"), "timed out"),
    ]
}

fn plain() {
    colored::control::set_override(false);
}

#[test]
fn test_overall_line() {
    let report = CheckReport::new("192.0.2.1", sample_results());
    assert_eq!(
        report.overall_line(),
        "Found 1 out of 3 services listing the target"
    );
    assert!(report.any_listed());
}

#[test]
fn test_category_counts() {
    let report = CheckReport::new("192.0.2.1", sample_results());
    assert_eq!(
        report.categories,
        vec![
            CategoryCount {
                category: "spam".to_string(),
                total: 2,
                listed: 1,
                not_listed: 1,
            },
            CategoryCount {
                category: "botnet".to_string(),
                total: 1,
                listed: 0,
                not_listed: 1,
            },
        ]
    );
    assert_eq!(report.summary.errors, 1);
}

#[test]
fn test_details_prefer_reason() {
    let results = sample_results();
    assert_eq!(display_details(&results[0]), "SBL - Spamhaus SBL Data");
    assert_eq!(display_details(&results[1]), "Not listed");
    assert_eq!(display_details(&results[2]), "Error: timed out");
}

#[test]
fn test_render_table_plain() {
    plain();
    let report = CheckReport::new("192.0.2.1", sample_results());
    let text = report.render_table();

    assert!(text.starts_with("DNSBL Check Results for 192.0.2.1\n"));
    assert!(text.contains("Service   Description    Status      Details\n"));
    assert!(text.contains("spamhaus  spamhaus list  Listed      SBL - Spamhaus SBL Data\n"));
    assert!(text.contains("dronebl   dronebl list   Not Listed  Error: timed out\n"));
    assert!(text.contains("Category Summary\n"));
    assert!(text.contains("spam      2      1       1\n"));
    assert!(text.ends_with("Found 1 out of 3 services listing the target\n"));
}

#[test]
fn test_render_empty_report() {
    plain();
    let report = CheckReport::new("example.com", Vec::new());
    assert!(!report.any_listed());
    assert!(report
        .render_table()
        .ends_with("Found 0 out of 0 services listing the target\n"));
}

#[test]
fn test_json_report() {
    let report = CheckReport::new("192.0.2.1", sample_results());
    let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(value["target"], "192.0.2.1");
    assert_eq!(value["summary"]["listed"], 1);
    assert_eq!(value["results"][0]["status"], "Listed");
    assert_eq!(value["results"][0]["return_ip"], "127.0.0.2");
    assert_eq!(value["results"][1]["status"], "Not Listed");
    assert_eq!(value["results"][2]["error"], "timed out");
    assert_eq!(value["categories"][1]["category"], "botnet");
}

#[test]
fn test_render_services_lists_every_service() {
    plain();
    let registry = ServiceRegistry::default();
    let text = render_services(&registry);
    assert_eq!(text.lines().count(), registry.len() + 2);
    assert!(text.contains("cinsscore"));
    assert!(text.contains("hostkarma.junkemailfilter.com"));
}
