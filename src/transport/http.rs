//! HTTP sender backed by reqwest.

use bytes::Bytes;

use crate::error::{Error, SendError};
use crate::http::{Body, Headers, Request, Response};

/// A single-attempt HTTP sender.
///
/// Converts a [`Request`] into a real HTTP call, buffers the response, and
/// classifies every failure into the [`SendError`] taxonomy. The sender
/// performs no retries and adds no timeouts of its own; it inherits
/// whatever the underlying client is configured with.
///
/// By default an error status (4xx/5xx) is reported as
/// [`SendError::Response`] with the buffered response attached; disable
/// [`with_status_errors`](HttpSender::with_status_errors) to receive error
/// statuses as plain responses instead.
#[derive(Clone)]
pub struct HttpSender {
    client: reqwest::Client,
    status_errors: bool,
}

impl std::fmt::Debug for HttpSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSender")
            .field("status_errors", &self.status_errors)
            .finish_non_exhaustive()
    }
}

impl HttpSender {
    /// Creates a sender with a default client.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Creates a sender over an existing client, preserving its pool and
    /// timeout configuration.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            status_errors: true,
        }
    }

    /// Sets whether error statuses are reported as failures.
    #[must_use]
    pub fn with_status_errors(mut self, status_errors: bool) -> Self {
        self.status_errors = status_errors;
        self
    }

    /// Sends the request once and returns the buffered outcome.
    ///
    /// Both the request and the returned response have their bodies
    /// positioned at the start.
    pub async fn send(&self, request: Request) -> Result<Response, SendError> {
        let method = match reqwest::Method::from_bytes(request.method().as_bytes()) {
            Ok(method) => method,
            Err(_) => {
                return Err(SendError::Other {
                    error: Error::invalid_request(format!(
                        "invalid method: {}",
                        request.method()
                    )),
                });
            }
        };

        let mut builder = self.client.request(method, request.uri().clone());
        for (name, values) in request.headers().iter() {
            for value in values {
                builder = builder.header(name, value);
            }
        }
        if !request.body().is_empty() {
            builder = builder.body(request.body().as_bytes().to_vec());
        }

        let raw = match builder.send().await {
            Ok(raw) => raw,
            Err(e) => return Err(classify_reqwest_error(request, e)),
        };

        let status = raw.status().as_u16();
        let mut headers = Headers::new();
        for (name, value) in raw.headers() {
            headers.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }

        let bytes: Bytes = match raw.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                let message = e.to_string();
                return Err(SendError::Other {
                    error: Error::protocol(message).with_source(e),
                });
            }
        };

        let response = Response::new(status)
            .with_headers(headers)
            .with_body(Body::from(bytes));

        if self.status_errors && status >= 400 {
            let error = Error::status(
                status,
                format!("HTTP status {} returned for {}", status, request.uri()),
            );
            return Err(SendError::Response {
                request,
                response,
                error,
            });
        }

        Ok(response)
    }
}

impl Default for HttpSender {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps a reqwest transport failure into the sender taxonomy.
fn classify_reqwest_error(request: Request, e: reqwest::Error) -> SendError {
    let message = e.to_string();
    if e.is_timeout() {
        SendError::Connection {
            request,
            error: Error::timeout(message).with_source(e),
        }
    } else if e.is_connect() {
        SendError::Connection {
            request,
            error: Error::connection(message).with_source(e),
        }
    } else if e.is_request() || e.is_builder() {
        SendError::Other {
            error: Error::invalid_request(message).with_source(e),
        }
    } else {
        SendError::Other {
            error: Error::other(message).with_source(e),
        }
    }
}
