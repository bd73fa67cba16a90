//! Shared helpers for integration tests.

use std::sync::Arc;

use url::Url;
use wiretap::{MemorySink, NoopTracer, Request, RequestLogging};

/// Builds a GET request for the given URL string.
pub fn get(url: &str) -> Request {
    Request::new("GET", Url::parse(url).expect("test URL must parse"))
}

/// Builds a POST request with the given body.
pub fn post(url: &str, body: &str) -> Request {
    Request::new("POST", Url::parse(url).expect("test URL must parse")).with_body(body)
}

/// Builds a logging middleware over a fresh capture sink.
pub fn logging_with_sink() -> (RequestLogging, MemorySink) {
    let sink = MemorySink::new();
    let middleware = RequestLogging::new(Arc::new(NoopTracer), Arc::new(sink.clone()));
    (middleware, sink)
}
