//! HTTP request and response values used throughout the middleware chain.
//!
//! These are owned, fully buffered representations: a [`Request`] carries
//! its method, URI, ordered [`Headers`], a buffered [`Body`], and an opaque
//! [`Options`] map that is forwarded to the sender untouched. The middleware
//! layer works on these values directly rather than on a specific HTTP
//! client's types; the `transport` module converts them at the edge.

mod body;
mod headers;

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use url::Url;

pub use body::Body;
pub use headers::Headers;

/// An outgoing HTTP request.
///
/// ## Example
///
/// ```rust
/// use url::Url;
/// use wiretap::Request;
///
/// let request = Request::new("POST", Url::parse("https://api.example.com/v1/items").unwrap())
///     .header("Content-Type", "application/json")
///     .with_body("{\"name\":\"widget\"}");
///
/// assert_eq!(request.method(), "POST");
/// assert_eq!(request.headers().get("content-type"), Some("application/json"));
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    method: String,
    uri: Url,
    headers: Headers,
    body: Body,
    options: Options,
}

impl Request {
    /// Creates a new request with an empty body.
    pub fn new(method: impl Into<String>, uri: Url) -> Self {
        Self {
            method: method.into(),
            uri,
            headers: Headers::new(),
            body: Body::empty(),
            options: Options::new(),
        }
    }

    /// Returns the request method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the request URI.
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    /// Returns the request headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns mutable access to the request headers.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Returns the request body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Returns mutable access to the request body.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Returns the pass-through options map.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns mutable access to the pass-through options map.
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    /// Appends a header (builder pattern).
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets the body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a pass-through option (builder pattern).
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.options.insert(key, value);
        self
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request({} {})", self.method, self.uri)
    }
}

/// An HTTP response.
///
/// The body is fully buffered; a consumer that reads it for inspection is
/// expected to [`Body::rewind`] it before handing the response on.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: Headers,
    body: Body,
}

impl Response {
    /// Creates a new response with the given status and an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: Body::empty(),
        }
    }

    /// Returns the status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns mutable access to the response headers.
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    /// Returns the response body.
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Returns mutable access to the response body.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    /// Appends a header (builder pattern).
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replaces the header set (builder pattern).
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the body (builder pattern).
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Response({})", self.status)
    }
}

/// An opaque map of sender options, forwarded through the chain untouched.
///
/// The middleware layer never inspects or mutates options; they exist so
/// callers can carry sender-specific settings past intermediate stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Options(HashMap<String, serde_json::Value>);

impl Options {
    /// Creates an empty options map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an option value.
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.0.insert(key.into(), value);
    }

    /// Returns the value for the given key, if any.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Returns the number of options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no options are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_request_builder() {
        let request = Request::new("GET", uri("https://example.com/a"))
            .header("Accept", "*/*")
            .with_body("hi")
            .option("timeout", serde_json::json!(5));

        assert_eq!(request.method(), "GET");
        assert_eq!(request.uri().as_str(), "https://example.com/a");
        assert_eq!(request.headers().get("accept"), Some("*/*"));
        assert_eq!(request.body().as_bytes(), b"hi");
        assert_eq!(request.options().get("timeout"), Some(&serde_json::json!(5)));
    }

    #[test]
    fn test_request_display() {
        let request = Request::new("GET", uri("https://example.com/a"));
        assert_eq!(format!("{}", request), "Request(GET https://example.com/a)");
    }

    #[test]
    fn test_request_clone_is_independent() {
        let request = Request::new("GET", uri("https://example.com/")).with_body("abc");
        let mut copy = request.clone();
        let _ = copy.body_mut().contents();
        // The original's cursor is untouched.
        assert_eq!(request.body().as_bytes(), b"abc");
    }

    #[test]
    fn test_response_builder() {
        let response = Response::new(201).header("X-Id", "7").with_body("created");
        assert_eq!(response.status(), 201);
        assert!(response.is_success());
        assert_eq!(response.headers().get("x-id"), Some("7"));
        assert_eq!(response.body().as_bytes(), b"created");
    }

    #[test]
    fn test_response_is_success() {
        assert!(Response::new(200).is_success());
        assert!(Response::new(299).is_success());
        assert!(!Response::new(199).is_success());
        assert!(!Response::new(404).is_success());
        assert!(!Response::new(500).is_success());
    }

    #[test]
    fn test_response_display() {
        assert_eq!(format!("{}", Response::new(503)), "Response(503)");
    }

    #[test]
    fn test_options() {
        let mut options = Options::new();
        assert!(options.is_empty());
        options.insert("http_errors", serde_json::json!(false));
        assert_eq!(options.len(), 1);
        assert_eq!(options.get("http_errors"), Some(&serde_json::json!(false)));
        assert_eq!(options.get("missing"), None);
    }
}
