//! Middleware chain over the HTTP sender.
//!
//! Middleware wraps the sender, allowing cross-cutting concerns like
//! logging, header injection, or request transformation to run around each
//! send without the sender knowing.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │ Request pipeline                                       │
//! │                                                        │
//! │  ┌──────────────┐                                      │
//! │  │ Your code    │  stack.process(request, sender)      │
//! │  └──────┬───────┘                                      │
//! │         ▼                                              │
//! │  ┌──────────────┐                                      │
//! │  │ Middleware 1 │  e.g. RequestLogging                 │
//! │  └──────┬───────┘                                      │
//! │         ▼                                              │
//! │  ┌──────────────┐                                      │
//! │  │ Middleware 2 │                                      │
//! │  └──────┬───────┘                                      │
//! │         ▼                                              │
//! │  ┌──────────────┐                                      │
//! │  │ Sender       │  HTTP call (single attempt)          │
//! │  └──────────────┘                                      │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Instant;
//! use wiretap::middleware::{Middleware, Next, ResponseFuture};
//! use wiretap::Request;
//!
//! struct TimingMiddleware;
//!
//! impl Middleware for TimingMiddleware {
//!     fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> ResponseFuture<'a> {
//!         Box::pin(async move {
//!             let start = Instant::now();
//!             let response = next.call(req).await?;
//!             println!("request took {:?}", start.elapsed());
//!             Ok(response)
//!         })
//!     }
//! }
//! ```

mod logging;

use std::{fmt, future::Future};

use futures::future::BoxFuture;

use crate::error::SendError;
use crate::http::{Request, Response};

pub use logging::RequestLogging;

/// Type alias for the response future returned by middleware handlers.
pub type ResponseFuture<'a> = BoxFuture<'a, Result<Response, SendError>>;

/// Type alias for the next handler function in the middleware chain.
type NextHandler<'a> = Box<dyn FnOnce(Request) -> ResponseFuture<'a> + Send + 'a>;

/// Boxed terminal sender at the end of a chain.
type BoxSender =
    Box<dyn FnOnce(Request) -> BoxFuture<'static, Result<Response, SendError>> + Send>;

/// Middleware for intercepting outgoing requests.
///
/// A middleware receives the request and a [`Next`] continuation holding
/// the rest of the chain. Calling `next.call(req)` continues; a middleware
/// can also:
/// - modify the request before calling `next`
/// - modify the response after `next` returns
/// - short-circuit and return early without calling `next`
/// - observe timing or outcomes around `next`
///
/// Wrapping a sender in a middleware must preserve the sender's contract:
/// the eventual success and failure values reach the caller unchanged
/// unless transformation is the middleware's explicit purpose.
pub trait Middleware: Send + Sync + 'static {
    /// Handles a request, optionally modifying it or the response.
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> ResponseFuture<'a>;
}

/// The next middleware or sender in the chain.
pub struct Next<'a> {
    inner: NextHandler<'a>,
}

impl<'a> Next<'a> {
    /// Creates a new `Next` wrapper.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce(Request) -> Fut + Send + 'a,
        Fut: Future<Output = Result<Response, SendError>> + Send + 'a,
    {
        Self {
            inner: Box::new(move |req| Box::pin(f(req))),
        }
    }

    /// Calls the next middleware or sender.
    pub async fn call(self, req: Request) -> Result<Response, SendError> {
        (self.inner)(req).await
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}

/// A stack of middleware that processes requests in order.
///
/// Middleware runs in the order added (first added = outermost); the
/// terminal sender passed to [`process`](MiddlewareStack::process) runs
/// at the end of the chain.
pub struct MiddlewareStack {
    middlewares: Vec<Box<dyn Middleware>>,
}

impl MiddlewareStack {
    /// Creates a new empty middleware stack.
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Adds a middleware to the stack.
    pub fn push(&mut self, middleware: impl Middleware) {
        self.middlewares.push(Box::new(middleware));
    }

    /// Adds a middleware to the stack (builder pattern).
    #[must_use]
    pub fn with(mut self, middleware: impl Middleware) -> Self {
        self.push(middleware);
        self
    }

    /// Returns `true` if the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Returns the number of middlewares in the stack.
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Processes a request through the middleware stack.
    ///
    /// The `sender` runs at the end of the chain; every middleware sees
    /// the request on the way in and the outcome on the way out.
    pub async fn process<F, Fut>(&self, req: Request, sender: F) -> Result<Response, SendError>
    where
        F: FnOnce(Request) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Response, SendError>> + Send + 'static,
    {
        let sender: BoxSender = Box::new(move |req| {
            Box::pin(sender(req)) as BoxFuture<'static, Result<Response, SendError>>
        });
        self.run(0, req, sender).await
    }

    fn run<'a>(&'a self, index: usize, req: Request, sender: BoxSender) -> ResponseFuture<'a> {
        Box::pin(async move {
            match self.middlewares.get(index) {
                None => sender(req).await,
                Some(middleware) => {
                    let next = Next::new(move |req| self.run(index + 1, req, sender));
                    middleware.handle(req, next).await
                }
            }
        })
    }
}

impl Default for MiddlewareStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MiddlewareStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareStack")
            .field("len", &self.middlewares.len())
            .finish()
    }
}

/// A no-op middleware that passes requests through unchanged.
///
/// Useful as a placeholder or for testing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughMiddleware;

impl Middleware for PassthroughMiddleware {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> ResponseFuture<'a> {
        Box::pin(async move { next.call(req).await })
    }
}
