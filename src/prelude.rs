//! Convenient imports for common usage.
//!
//! ```rust
//! use wiretap::prelude::*;
//! ```

pub use crate::config::LogConfig;
pub use crate::error::{Error, ErrorKind, SendError};
pub use crate::http::{Body, Headers, Options, Request, Response};
pub use crate::log::{LogRecord, LogSink, MemorySink, Outcome};
#[cfg(feature = "tracing")]
pub use crate::log::TracingSink;
pub use crate::middleware::{Middleware, MiddlewareStack, Next, RequestLogging};
pub use crate::trace::{CurrentSpan, NoopTracer, SpanContext, Tracer};

#[cfg(feature = "client")]
pub use crate::transport::HttpSender;
