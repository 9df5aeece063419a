//! DNS module tests.

use super::*;
use hickory_resolver::config::{
    NameServerConfig, NameServerConfigGroup, Protocol, ResolverConfig, ResolverOpts,
};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_resolver::proto::rr::{Name, RecordType};
use hickory_resolver::TokioAsyncResolver;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;

fn no_records(code: ResponseCode) -> ResolveError {
    let query = Query::query(
        Name::from_ascii("4.3.2.1.zen.spamhaus.org.").unwrap(),
        RecordType::A,
    );
    ResolveErrorKind::NoRecordsFound {
        query: Box::new(query),
        soa: None,
        negative_ttl: None,
        response_code: code,
        trusted: true,
    }
    .into()
}

#[test]
fn test_nxdomain_is_not_found() {
    assert_eq!(
        outcome_from_error(&no_records(ResponseCode::NXDomain)),
        LookupOutcome::NotFound
    );
}

#[test]
fn test_nodata_is_not_found() {
    assert_eq!(
        outcome_from_error(&no_records(ResponseCode::NoError)),
        LookupOutcome::NotFound
    );
}

#[test]
fn test_servfail_is_error() {
    let outcome = outcome_from_error(&no_records(ResponseCode::ServFail));
    assert!(matches!(outcome, LookupOutcome::Error(_)));
}

#[test]
fn test_refused_is_error() {
    let outcome = outcome_from_error(&no_records(ResponseCode::Refused));
    assert!(matches!(outcome, LookupOutcome::Error(_)));
}

#[test]
fn test_timeout_is_error() {
    let err: ResolveError = ResolveErrorKind::Timeout.into();
    match outcome_from_error(&err) {
        LookupOutcome::Error(msg) => assert!(!msg.is_empty()),
        other => panic!("timeout must surface as an error, got {:?}", other),
    }
}

#[test]
fn test_message_error_is_error() {
    let err = ResolveError::from("malformed response");
    assert_eq!(
        outcome_from_error(&err),
        LookupOutcome::Error("malformed response".to_string())
    );
}

/// A resolver pointed at a blackhole address (TEST-NET-1, nothing listens).
fn unreachable_resolver() -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(5);
    opts.attempts = 1;
    opts.ndots = 0;
    let group = NameServerConfigGroup::from_ips_clear(
        &[IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1))],
        53,
        true,
    );
    Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::from_parts(None, vec![], group),
        opts,
    ))
}

#[tokio::test]
async fn test_unreachable_resolver_yields_error_within_timeout() {
    let lookup = HickoryLookup::new(unreachable_resolver(), Duration::from_millis(300));
    let start = Instant::now();
    let outcome = lookup.resolve_a("4.3.2.1.zen.spamhaus.org").await;
    assert!(
        matches!(outcome, LookupOutcome::Error(_)),
        "unreachable resolver must not look like 'not listed': {:?}",
        outcome
    );
    assert!(start.elapsed() < Duration::from_secs(3));
}

/// Loopback nameserver that ignores the first `drop_first` queries and
/// answers NXDOMAIN to the rest. Returns its port and a query counter.
async fn flaky_nameserver(drop_first: usize) -> (u16, Arc<AtomicUsize>) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let port = socket.local_addr().unwrap().port();
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();

    tokio::spawn(async move {
        let mut buf = [0u8; 512];
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                return;
            };
            if counter.fetch_add(1, Ordering::SeqCst) < drop_first {
                continue;
            }
            let Ok(request) = Message::from_vec(&buf[..len]) else {
                continue;
            };
            let mut response = Message::new();
            response
                .set_id(request.id())
                .set_message_type(MessageType::Response)
                .set_op_code(OpCode::Query)
                .set_recursion_desired(request.recursion_desired())
                .set_recursion_available(true)
                .set_response_code(ResponseCode::NXDomain)
                .add_queries(request.queries().to_vec());
            let _ = socket.send_to(&response.to_vec().unwrap(), peer).await;
        }
    });

    (port, seen)
}

fn loopback_resolver(port: u16, per_attempt: Duration, attempts: usize) -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = per_attempt;
    opts.attempts = attempts;
    opts.ndots = 0;
    opts.cache_size = 0;
    // UDP only, so a dropped packet can only be recovered by a resolver retry
    let server = NameServerConfig::new(SocketAddr::from((Ipv4Addr::LOCALHOST, port)), Protocol::Udp);
    Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::from_parts(None, vec![], NameServerConfigGroup::from(vec![server])),
        opts,
    ))
}

#[tokio::test]
async fn test_lost_first_packet_is_retried_by_resolver() {
    let per_attempt = Duration::from_millis(400);
    let (port, seen) = flaky_nameserver(1).await;
    let lookup = HickoryLookup::for_attempts(loopback_resolver(port, per_attempt, 2), per_attempt, 2);

    let outcome = lookup.resolve_a("1.2.0.192.zen.example.org").await;
    assert_eq!(outcome, LookupOutcome::NotFound);
    assert!(seen.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn test_silent_nameserver_times_out_with_readable_message() {
    let (port, _seen) = flaky_nameserver(usize::MAX).await;
    let lookup = HickoryLookup::new(
        loopback_resolver(port, Duration::from_secs(5), 1),
        Duration::from_millis(250),
    );

    let outcome = lookup.resolve_a("1.2.0.192.zen.example.org").await;
    assert_eq!(
        outcome,
        LookupOutcome::Error("DNS lookup timed out after 250ms".to_string())
    );
}

#[test]
fn test_lookup_deadline_covers_every_attempt() {
    let per_attempt = Duration::from_secs(5);
    assert_eq!(
        lookup_deadline(per_attempt, 2),
        Duration::from_secs(10) + crate::config::DNS_DEADLINE_MARGIN
    );
    // zero attempts still means one try
    assert_eq!(
        lookup_deadline(per_attempt, 0),
        lookup_deadline(per_attempt, 1)
    );
}
