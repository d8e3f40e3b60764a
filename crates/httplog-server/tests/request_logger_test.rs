mod helpers;

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{Request, StatusCode},
    routing::post,
};
use helpers::{BrokenBody, TestClient, records};
use httplog_core::{MemorySink, RecordKind};
use httplog_server::{LoggerOptions, request_logger};

async fn body_len(body: Bytes) -> String {
    format!("len={}", body.len())
}

fn routes() -> Router {
    Router::new()
        .route("/items", post(body_len))
        .route("/echo", post(|body: Bytes| async move { body }))
}

fn app(sink: &MemorySink, options: LoggerOptions) -> TestClient {
    TestClient::new(routes().layer(request_logger(Arc::new(sink.clone())).options(options)))
}

fn broken_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/items")
        .header("host", "example.com")
        .body(Body::new(BrokenBody))
        .unwrap()
}

#[tokio::test]
async fn request_record_carries_request_line_headers_and_body() {
    let sink = MemorySink::new();
    let client = app(&sink, LoggerOptions::default());

    client
        .request(
            Request::builder()
                .method("POST")
                .uri("/items?x=1")
                .header("host", "example.com")
                .header("x-test", "a")
                .body(Body::from("payload"))
                .unwrap(),
        )
        .await
        .assert_status(StatusCode::OK);

    let records = records(&sink);
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.kind(), RecordKind::Request);
    assert_eq!(record.host(), "example.com");
    assert_eq!(record.url(), "/items?x=1");
    assert_eq!(record.method(), "POST");
    assert_eq!(record.status(), 0);
    assert_eq!(record.body(), b"payload");
    assert_eq!(record.headers().len(), 1);
    assert_eq!(record.headers().get_all("X-Test"), ["a".to_string()]);
}

#[tokio::test]
async fn repeated_headers_keep_every_value() {
    let sink = MemorySink::new();
    let client = app(&sink, LoggerOptions::default());

    client
        .request(
            Request::builder()
                .method("POST")
                .uri("/items")
                .header("host", "example.com")
                .header("accept", "text/plain")
                .header("accept", "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    let records = records(&sink);
    assert_eq!(
        records[0].headers().get_all("Accept"),
        ["text/plain".to_string(), "application/json".to_string()]
    );
    assert!(!records[0].headers().contains("Host"));
}

#[tokio::test]
async fn handler_sees_restored_body() {
    let sink = MemorySink::new();
    let client = app(&sink, LoggerOptions::default());

    let response = client.post("/echo", "ping").await;

    assert_eq!(response.text(), "ping");
    assert_eq!(records(&sink)[0].body(), b"ping");
}

#[tokio::test]
async fn handler_sees_empty_body_without_restore() {
    let sink = MemorySink::new();
    let options = LoggerOptions::builder()
        .restore_request_body(false)
        .build();
    let client = app(&sink, options);

    let response = client.post("/echo", "ping").await;

    assert_eq!(response.text(), "");
    assert_eq!(records(&sink)[0].body(), b"ping");
}

#[tokio::test]
async fn unreadable_body_is_logged_as_empty_and_error_reaches_handler() {
    let sink = MemorySink::new();
    let plain = TestClient::new(routes());
    let wrapped = app(&sink, LoggerOptions::default());

    let expected = plain.request(broken_request()).await;
    let actual = wrapped.request(broken_request()).await;

    assert_eq!(expected.status, StatusCode::BAD_REQUEST);
    assert_eq!(actual, expected);

    let records = records(&sink);
    assert_eq!(records.len(), 1);
    assert!(records[0].body().is_empty());
}

#[tokio::test]
async fn host_falls_back_to_uri_authority() {
    let sink = MemorySink::new();
    let client = app(&sink, LoggerOptions::default());

    client
        .request(
            Request::builder()
                .method("POST")
                .uri("http://api.internal:9000/items")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    let records = records(&sink);
    assert_eq!(records[0].host(), "api.internal:9000");
    assert_eq!(records[0].url(), "http://api.internal:9000/items");
}
