//! # wiretap
//!
//! Trace-propagating request/response logging for async HTTP clients.
//!
//! `wiretap` wraps an HTTP sender in a middleware chain and observes every
//! outgoing request: it injects `sentry-trace`/`baggage` headers from the
//! active span, captures truncated body excerpts, measures elapsed time,
//! and emits one structured record per attempt (`info` on success,
//! `warning` on failure) while passing the outcome through unchanged.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use url::Url;
//! use wiretap::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), wiretap::SendError> {
//!     let tracer = Arc::new(CurrentSpan::new());
//!     let stack = MiddlewareStack::new()
//!         .with(RequestLogging::new(tracer.clone(), Arc::new(TracingSink)));
//!
//!     let sender = HttpSender::new();
//!     let request = Request::new("GET", Url::parse("https://api.example.com/pets").unwrap())
//!         .header("Accept", "application/json");
//!
//!     let response = stack
//!         .process(request, move |req| async move { sender.send(req).await })
//!         .await?;
//!
//!     println!("status: {}", response.status());
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Pass-through contract**: logging is a side effect. The response a
//!   caller awaits, and the failure it catches, are exactly what the
//!   sender produced.
//! - **Closed failure taxonomy**: a sender fails as [`SendError::Response`]
//!   (response attached), [`SendError::Connection`] (request only), or
//!   [`SendError::Other`] (minimal context), and records carry exactly the
//!   fields each branch has.
//! - **Single-consumer bodies**: reading a [`Body`] for logging advances
//!   its cursor; the middleware rewinds response bodies so downstream
//!   consumers see an unconsumed stream.
//!
//! ## Features
//!
//! - `client` (default): reqwest-backed [`HttpSender`]
//! - `rustls` (default): use rustls for TLS
//! - `native-tls`: use native TLS instead
//! - `tracing` (default): [`TracingSink`] emitting through the `tracing`
//!   crate

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod config;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod log;
pub mod middleware;
pub mod text;
pub mod trace;

// Transport layer
#[cfg(feature = "client")]
#[cfg_attr(docsrs, doc(cfg(feature = "client")))]
pub mod transport;

// Testing utilities
pub mod testing;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use config::{DEFAULT_MAX_BODY_TRACE, LogConfig};
pub use error::{Error, ErrorKind, SendError};
pub use http::{Body, Headers, Options, Request, Response};
pub use log::{CATEGORY, Emission, ErrorInfo, LogRecord, LogSink, MemorySink, Outcome, SinkLevel};
#[cfg(feature = "tracing")]
pub use log::TracingSink;
pub use middleware::{Middleware, MiddlewareStack, Next, PassthroughMiddleware, RequestLogging};
pub use text::NOT_READABLE;
pub use trace::{
    BAGGAGE_HEADER, CurrentSpan, NoopTracer, SENTRY_TRACE_HEADER, SpanContext, SpanId, TraceId,
    Tracer,
};

// Re-export fetcher types
pub use fetcher::{NoopFetcher, RequestFetcher, RequestStore, StoreFetcher};

// Transport support
#[cfg(feature = "client")]
pub use transport::HttpSender;

// Testing support
pub use testing::MockSender;
