//! Testing utilities.
//!
//! [`MockSender`] stands in for a real HTTP sender: it replays scripted
//! outcomes and records every request it receives, so tests can assert on
//! what the middleware actually forwarded.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::SendError;
use crate::http::{Request, Response};

/// A scripted sender for tests.
///
/// Outcomes queue in the order added and are consumed one per call; when
/// the queue runs dry the sender answers with an empty `200`. Clones share
/// the same queue and request log.
///
/// ## Example
///
/// ```rust
/// use wiretap::{MockSender, Response};
///
/// # tokio_test::block_on(async {
/// let sender = MockSender::new().respond(Response::new(204));
///
/// let request = wiretap::Request::new(
///     "DELETE",
///     url::Url::parse("https://example.com/items/1").unwrap(),
/// );
/// let response = sender.call(request).await.unwrap();
///
/// assert_eq!(response.status(), 204);
/// assert_eq!(sender.request_count(), 1);
/// # });
/// ```
#[derive(Clone, Default)]
pub struct MockSender {
    outcomes: Arc<Mutex<VecDeque<Result<Response, SendError>>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl MockSender {
    /// Creates a sender with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response (builder pattern).
    #[must_use]
    pub fn respond(self, response: Response) -> Self {
        self.outcomes.lock().push_back(Ok(response));
        self
    }

    /// Queues a failure (builder pattern).
    #[must_use]
    pub fn fail(self, failure: SendError) -> Self {
        self.outcomes.lock().push_back(Err(failure));
        self
    }

    /// Handles one request: records it and pops the next scripted outcome.
    pub async fn call(&self, request: Request) -> Result<Response, SendError> {
        self.requests.lock().push(request);
        self.outcomes
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Response::new(200)))
    }

    /// Returns copies of every request received so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Returns the number of requests received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl fmt::Debug for MockSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockSender")
            .field("queued", &self.outcomes.lock().len())
            .field("received", &self.requests.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::error::Error;

    use super::*;

    fn request() -> Request {
        Request::new("GET", Url::parse("https://example.com/x").unwrap())
    }

    #[tokio::test]
    async fn test_scripted_outcomes_in_order() {
        let sender = MockSender::new()
            .respond(Response::new(201))
            .fail(SendError::Other {
                error: Error::other("scripted"),
            });

        assert_eq!(sender.call(request()).await.unwrap().status(), 201);
        assert!(sender.call(request()).await.is_err());
    }

    #[tokio::test]
    async fn test_default_outcome_when_script_empty() {
        let sender = MockSender::new();
        let response = sender.call(request()).await.unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_records_received_requests() {
        let sender = MockSender::new();
        let _ = sender.call(request().header("X-Probe", "1")).await;

        let requests = sender.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].headers().get("X-Probe"), Some("1"));
        assert_eq!(sender.request_count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let sender = MockSender::new().respond(Response::new(204));
        let clone = sender.clone();
        let _ = clone.call(request()).await;
        assert_eq!(sender.request_count(), 1);
    }

    #[test]
    fn test_debug() {
        let sender = MockSender::new().respond(Response::new(200));
        let debug = format!("{:?}", sender);
        assert!(debug.contains("queued: 1"));
    }
}
