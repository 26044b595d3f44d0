use super::*;
use crate::error::{Error, FetchError};
use crate::types::{Payload, Target, TaskResult, TaskStatus};
use serde_json::json;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};


/// Short per-request timeout so timeout paths finish quickly
const TEST_TIMEOUT: Duration = Duration::from_millis(300);

fn test_engine(concurrency_limit: usize) -> FetchEngine {
    test_engine_with_timeout(concurrency_limit, TEST_TIMEOUT)
}

fn test_engine_with_timeout(concurrency_limit: usize, request_timeout: Duration) -> FetchEngine {
    FetchEngine::new(Config {
        concurrency_limit,
        request_timeout,
        ..Default::default()
    })
    .unwrap()
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, code: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(code))
        .mount(server)
        .await;
}

async fn mount_delayed_json(server: &MockServer, route: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"delayed": true}))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

fn failure_reason(result: &TaskResult) -> &str {
    match &result.status {
        TaskStatus::Failed(reason) => reason,
        other => panic!("expected FAILED for {}, got {other:?}", result.target),
    }
}

/// URL on a local port nothing listens on
fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/refused")
}

#[test]
fn test_new_rejects_zero_concurrency() {
    let result = FetchEngine::new(Config::with_concurrency_limit(0));

    assert!(matches!(
        result,
        Err(Error::Config { key: Some(ref k), .. }) if k == "concurrency_limit"
    ));
}

#[test]
fn test_new_builds_gate_from_config() {
    let engine = FetchEngine::new(Config::with_concurrency_limit(7)).unwrap();

    assert_eq!(engine.gate().capacity(), 7);
    assert_eq!(engine.config().concurrency_limit, 7);
}

#[test]
fn test_clones_share_gate() {
    let engine = FetchEngine::new(Config::with_concurrency_limit(2)).unwrap();
    let clone = engine.clone();

    engine.shutdown();
    assert!(clone.gate().is_closed());
}
