//! End-to-end tests: logging middleware over the reqwest sender against a
//! local wiremock server.

use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wiretap::{HttpSender, MiddlewareStack, RequestLogging, SendError, SinkLevel};

use crate::common::{get, logging_with_sink, post};

fn stack(middleware: RequestLogging) -> MiddlewareStack {
    MiddlewareStack::new().with(middleware)
}

#[tokio::test]
async fn success_is_logged_and_passed_through() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pets"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Id", "7")
                .set_body_string("three pets"),
        )
        .mount(&server)
        .await;

    let (middleware, sink) = logging_with_sink();
    let sender = HttpSender::new();
    let response = stack(middleware)
        .process(get(&format!("{}/pets", server.uri())), move |req| {
            async move { sender.send(req).await }
        })
        .await?;

    assert_eq!(response.status(), 200);
    let mut body = response.body().clone();
    assert_eq!(body.contents().as_deref(), Some("three pets"));

    let emissions = sink.emissions();
    assert_eq!(emissions.len(), 1);
    assert_eq!(emissions[0].level, SinkLevel::Info);
    assert_eq!(
        emissions[0].message,
        format!("GET:{}/pets", server.uri())
    );
    let outcome = &emissions[0].record.outcome;
    assert_eq!(outcome.response_body(), Some("three pets"));
    assert_eq!(
        outcome.response_headers().and_then(|h| h.get("x-id")),
        Some("7")
    );
    Ok(())
}

#[tokio::test]
async fn request_headers_and_body_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("X-Probe", "1"))
        .and(body_string("payload"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let (middleware, _sink) = logging_with_sink();
    let sender = HttpSender::new();
    let request = post(&format!("{}/items", server.uri()), "payload").header("X-Probe", "1");

    let response = stack(middleware)
        .process(request, move |req| async move { sender.send(req).await })
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    server.verify().await;
}

#[tokio::test]
async fn error_status_becomes_response_failure_with_context() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("X-Err", "1")
                .set_body_string("boom"),
        )
        .mount(&server)
        .await;

    let (middleware, sink) = logging_with_sink();
    let sender = HttpSender::new();
    let result = stack(middleware)
        .process(get(&format!("{}/broken", server.uri())), move |req| {
            async move { sender.send(req).await }
        })
        .await;

    match result {
        Err(SendError::Response { response, error, .. }) => {
            assert_eq!(response.status(), 500);
            assert_eq!(error.code(), Some(500));
        }
        _ => unreachable!("expected a response-level failure"),
    }

    let emissions = sink.emissions();
    assert_eq!(emissions[0].level, SinkLevel::Warning);
    let json = serde_json::to_value(&emissions[0].record).unwrap();
    assert_eq!(json["code"], serde_json::json!(500));
    assert_eq!(json["response_body"], "boom");
    assert_eq!(json["error"]["kind"], "status");
}

#[tokio::test]
async fn unreachable_server_becomes_connection_failure() {
    // Port 1 is reserved and closed on any sane test host.
    let (middleware, sink) = logging_with_sink();
    let sender = HttpSender::new();
    let result = stack(middleware)
        .process(get("http://127.0.0.1:1/nope"), move |req| async move {
            sender.send(req).await
        })
        .await;

    assert!(matches!(result, Err(SendError::Connection { .. })));

    let json = serde_json::to_value(&sink.emissions()[0].record).unwrap();
    assert!(json.get("response_headers").is_none());
    assert!(json.get("response_body").is_none());
    assert_eq!(json["path"], "GET:http://127.0.0.1:1/nope");
}

#[tokio::test]
async fn status_errors_can_be_disabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let sender = HttpSender::new().with_status_errors(false);
    let response = sender
        .send(get(&format!("{}/missing", server.uri())))
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    assert!(!response.is_success());
}

#[tokio::test]
async fn trace_headers_arrive_at_the_server() {
    use std::sync::Arc;
    use wiretap::{CurrentSpan, MemorySink, SpanContext};

    let server = MockServer::start().await;
    let span = SpanContext::new_root().with_baggage("env=test");
    Mock::given(method("GET"))
        .and(path("/traced"))
        .and(header("sentry-trace", span.to_trace_header().as_str()))
        .and(header("baggage", "env=test"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let current = Arc::new(CurrentSpan::new());
    current.set(span);
    let middleware = RequestLogging::new(current, Arc::new(MemorySink::new()));

    let sender = HttpSender::new();
    stack(middleware)
        .process(get(&format!("{}/traced", server.uri())), move |req| {
            async move { sender.send(req).await }
        })
        .await
        .unwrap();

    server.verify().await;
}
