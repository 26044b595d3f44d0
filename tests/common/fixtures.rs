//! Mock HTTP endpoints and engine constructors

use bounded_fetch::{Config, FetchEngine};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Per-request timeout used by integration tests in place of the 15 second default
pub const TEST_TIMEOUT: Duration = Duration::from_millis(500);

/// Create an engine with the given concurrency limit and [`TEST_TIMEOUT`]
pub fn create_engine(concurrency_limit: usize) -> FetchEngine {
    FetchEngine::new(Config {
        concurrency_limit,
        request_timeout: TEST_TIMEOUT,
        ..Default::default()
    })
    .expect("valid test config")
}

/// Mock server with the three endpoints of the reference scenario
///
/// - `/a` returns 200 with `{"x":1,"y":2}`
/// - `/b` returns 404
/// - `/c` never responds within [`TEST_TIMEOUT`]
pub async fn start_scenario_server() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"x": 1, "y": 2})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    server
}

/// Mock server whose `/work/{n}` endpoints answer `{"n": n}` after `delay`
pub async fn start_delayed_server(count: usize, delay: Duration) -> MockServer {
    let server = MockServer::start().await;

    for n in 0..count {
        Mock::given(method("GET"))
            .and(path(format!("/work/{n}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "n": n }))
                    .set_delay(delay),
            )
            .mount(&server)
            .await;
    }

    server
}
