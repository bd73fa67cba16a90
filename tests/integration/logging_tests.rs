//! Logging middleware behavior over a scripted sender.

use std::sync::Arc;

use wiretap::{
    CurrentSpan, Error, MemorySink, MiddlewareStack, MockSender, Request, RequestLogging,
    Response, SendError, SinkLevel, SpanContext,
};

use crate::common::{get, logging_with_sink, post};

async fn process(
    middleware: RequestLogging,
    sender: MockSender,
    request: Request,
) -> Result<Response, SendError> {
    let stack = MiddlewareStack::new().with(middleware);
    stack
        .process(request, move |req| async move { sender.call(req).await })
        .await
}

#[tokio::test]
async fn long_bodies_truncate_and_response_stays_readable() {
    let (middleware, sink) = logging_with_sink();
    let long_request_body = "a".repeat(250);
    let long_response_body = "b".repeat(250);
    let sender = MockSender::new().respond(Response::new(200).with_body(long_response_body.clone()));

    let response = process(
        middleware,
        sender,
        post("https://api.example.com/items", &long_request_body),
    )
    .await
    .unwrap();

    let emissions = sink.emissions();
    let outcome = &emissions[0].record.outcome;
    let request_excerpt = outcome.request_body();
    let response_excerpt = outcome.response_body().unwrap();

    assert_eq!(request_excerpt.chars().count(), 203);
    assert!(request_excerpt.ends_with("..."));
    assert_eq!(response_excerpt.chars().count(), 203);
    assert!(response_excerpt.ends_with("..."));

    // The caller can still read the full response body.
    let mut body = response.body().clone();
    assert_eq!(body.contents().as_deref(), Some(long_response_body.as_str()));
}

#[tokio::test]
async fn short_bodies_logged_verbatim() {
    let (middleware, sink) = logging_with_sink();
    let sender = MockSender::new().respond(Response::new(200).with_body("exact"));

    let _ = process(
        middleware,
        sender,
        post("https://api.example.com/items", "payload"),
    )
    .await;

    let emissions = sink.emissions();
    let outcome = &emissions[0].record.outcome;
    assert_eq!(outcome.request_body(), "payload");
    assert_eq!(outcome.response_body(), Some("exact"));
}

#[tokio::test]
async fn response_error_logs_response_headers_and_reraises() {
    let (middleware, sink) = logging_with_sink();
    let request = get("https://api.example.com/items");
    let failure = SendError::Response {
        request: request.clone(),
        response: Response::new(500).header("X-Err", "1"),
        error: Error::status(500, "HTTP status 500"),
    };
    let sender = MockSender::new().fail(failure);

    let result = process(middleware, sender, request).await;

    // The original failure reaches the caller.
    assert!(matches!(result, Err(SendError::Response { .. })));

    let emissions = sink.emissions();
    let emission = &emissions[0];
    assert_eq!(emission.level, SinkLevel::Warning);

    let json = serde_json::to_value(&emission.record).unwrap();
    assert_eq!(
        json["response_headers"],
        serde_json::json!({"X-Err": ["1"]})
    );
    assert_eq!(json["code"], serde_json::json!(500));
}

#[tokio::test]
async fn connection_error_record_has_no_response_fields() {
    let (middleware, sink) = logging_with_sink();
    let request = get("https://api.example.com/items");
    let failure = SendError::Connection {
        request: request.clone(),
        error: Error::connection("connection refused"),
    };
    let sender = MockSender::new().fail(failure);

    let result = process(middleware, sender, request).await;
    assert!(matches!(result, Err(SendError::Connection { .. })));

    let json = serde_json::to_value(&sink.emissions()[0].record).unwrap();
    assert!(json.get("response_headers").is_none());
    assert!(json.get("response_body").is_none());
    assert_eq!(json["path"], "GET:https://api.example.com/items");
}

#[tokio::test]
async fn two_invocations_emit_independently() {
    let (middleware, sink) = logging_with_sink();
    let stack = MiddlewareStack::new().with(middleware);

    for _ in 0..2 {
        let sender = MockSender::new().respond(Response::new(200));
        stack
            .process(get("https://api.example.com/items"), move |req| async move {
                sender.call(req).await
            })
            .await
            .unwrap();
    }

    let emissions = sink.emissions();
    assert_eq!(emissions.len(), 2);
    assert_eq!(emissions[0].level, SinkLevel::Info);
    assert_eq!(emissions[1].level, SinkLevel::Info);
}

#[tokio::test]
async fn active_span_injects_trace_and_baggage_headers() {
    let sink = MemorySink::new();
    let current = Arc::new(CurrentSpan::new());
    let span = SpanContext::new_root().with_baggage("release=2.1");
    current.set(span.clone());

    let middleware = RequestLogging::new(current, Arc::new(sink.clone()));
    let sender = MockSender::new();

    let _ = process(
        middleware,
        sender.clone(),
        get("https://api.example.com/items"),
    )
    .await;

    let forwarded = &sender.requests()[0];
    assert_eq!(
        forwarded.headers().get("sentry-trace"),
        Some(span.to_trace_header().as_str())
    );
    assert_eq!(forwarded.headers().get("baggage"), Some("release=2.1"));
}

#[tokio::test]
async fn span_without_baggage_adds_only_trace_header() {
    let sink = MemorySink::new();
    let current = Arc::new(CurrentSpan::new());
    current.set(SpanContext::new_root());

    let middleware = RequestLogging::new(current, Arc::new(sink.clone()));
    let sender = MockSender::new();

    let _ = process(
        middleware,
        sender.clone(),
        get("https://api.example.com/items"),
    )
    .await;

    let forwarded = &sender.requests()[0];
    assert!(forwarded.headers().contains("sentry-trace"));
    assert!(!forwarded.headers().contains("baggage"));
}

#[tokio::test]
async fn no_span_forwards_request_identically() {
    let (middleware, _sink) = logging_with_sink();
    let sender = MockSender::new();
    let request = get("https://api.example.com/items")
        .header("Accept", "application/json")
        .with_body("hello");

    let _ = process(middleware, sender.clone(), request.clone()).await;

    let forwarded = &sender.requests()[0];
    assert_eq!(forwarded.method(), request.method());
    assert_eq!(forwarded.uri(), request.uri());
    assert_eq!(forwarded.headers(), request.headers());
    assert_eq!(forwarded.body().as_bytes(), request.body().as_bytes());
}
