//! Structured request logging: the record shape and its sinks.
//!
//! A [`LogRecord`] is built once per request attempt and handed to a
//! [`LogSink`]; the [`Outcome`] inside it has one fixed field set per
//! branch, so the shape of every emission is statically known.

mod record;
mod sink;

pub use record::{CATEGORY, ErrorInfo, LogRecord, Outcome};
#[cfg(feature = "tracing")]
pub use sink::TracingSink;
pub use sink::{Emission, LogSink, MemorySink, SinkLevel};
