//! Tracker tests over real HTTP against wiremock.
//!
//! Covers transport edge cases the mock API cannot produce on demand:
//! slow responses, aborts in flight and overlapping calls.

use std::time::{Duration, Instant};

use reqstate::{AbortSignal, ApiClient, CallArgs, Registry, ReqStatus, REQUEST_ABORTED};
use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup() -> (MockServer, ApiClient, Registry) {
    let server = MockServer::start().await;
    let client = ApiClient::new(&server.uri()).unwrap();
    let registry = Registry::for_client(&client);
    (server, client, registry)
}

#[tokio::test]
async fn test_abort_in_flight_settles_quickly() {
    let (server, client, registry) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"meta": {"success": true}}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let tracker = registry.tracker("getSlow", client.endpoint(Method::GET, "/api/slow"));
    let signal = AbortSignal::new();

    let trigger = signal.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.abort();
    });

    let started = Instant::now();
    let result = tracker.call(CallArgs::new().with_signal(signal)).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(result.error_type(), Some(REQUEST_ABORTED));
    assert_eq!(result.meta.status, 0);
    assert_eq!(result.meta.url, format!("{}/api/slow", server.uri()));
    assert!(!result.meta.is_runtime_exception);
    assert_eq!(tracker.status(), ReqStatus::Done);
    assert!(registry.notifications().is_empty());
}

#[tokio::test]
async fn test_body_is_sent() {
    let (server, client, registry) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/profile"))
        .and(body_json(json!({"age": -1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"saved": true}})))
        .expect(1)
        .mount(&server)
        .await;

    let tracker = registry.tracker("postProfile", client.endpoint(Method::POST, "/api/profile"));
    let result = tracker
        .call(CallArgs::new().with_body(json!({"age": -1})))
        .await;

    assert!(result.meta.success);
    assert_eq!(tracker.data(), Some(json!({"saved": true})));
}

#[tokio::test]
async fn test_overlapping_calls_store_latest() {
    let (server, client, registry) = setup().await;
    Mock::given(method("POST"))
        .and(body_json(json!({"call": 1})))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"title": "first"}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_json(json!({"call": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "second"})))
        .mount(&server)
        .await;

    let tracker = registry.tracker("postRace", client.endpoint(Method::POST, "/api/race"));

    let slow = tracker.call(CallArgs::new().with_body(json!({"call": 1})));
    let fast = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        tracker.call(CallArgs::new().with_body(json!({"call": 2}))).await
    };
    let (first, second) = tokio::join!(slow, fast);

    // Each caller gets its own result
    assert_eq!(first.meta.status, 400);
    assert_eq!(second.meta.status, 200);

    // Only the latest call is stored
    let state = tracker.snapshot();
    assert_eq!(state.generation(), 2);
    assert_eq!(state.result(), Some(&second));
    assert!(state.is_success());
}

#[tokio::test]
async fn test_bad_gateway_is_runtime_exception() {
    let (server, client, registry) = setup().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_json(json!({"title": "Bad gateway"})))
        .mount(&server)
        .await;

    let tracker = registry.tracker("getUpstream", client.endpoint(Method::GET, "/api/upstream"));
    let result = tracker.call_default().await;

    assert_eq!(result.meta.status, 502);
    assert!(result.meta.is_runtime_exception);
    assert!(!result.meta.catch_block_error);
    assert_eq!(registry.notifications().len(), 1);
}

#[tokio::test]
async fn test_html_body_is_parsing_error() {
    let (server, client, registry) = setup().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>hi</body></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    let tracker = registry.tracker("getTextContent", client.endpoint(Method::GET, "/"));
    let result = tracker.call_default().await;

    assert_eq!(result.meta.status, 200);
    assert!(!result.meta.success);
    assert!(result.is_parsing_error());
    assert!(result.meta.is_runtime_exception);
    assert!(tracker.is_failed());
}
