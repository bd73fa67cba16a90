//! Distributed-tracing support: span context, identifiers, and header
//! propagation.
//!
//! The middleware asks a [`Tracer`] for the current [`SpanContext`] and,
//! when one is active, [`inject`]s its `sentry-trace` (and optional
//! `baggage`) headers into the outgoing request.

mod context;
mod tracer;

pub use context::{SpanContext, SpanId, TraceId, TraceParseError};
pub use tracer::{
    BAGGAGE_HEADER, CurrentSpan, NoopTracer, SENTRY_TRACE_HEADER, Tracer, inject,
};
