//! Tracer abstraction and header injection.

use std::fmt;

use parking_lot::RwLock;

use crate::http::Headers;

use super::SpanContext;

/// Header carrying the trace context of the current span.
pub const SENTRY_TRACE_HEADER: &str = "sentry-trace";

/// Header carrying baggage metadata alongside the trace header.
pub const BAGGAGE_HEADER: &str = "baggage";

/// Source of the current span's propagation context.
///
/// The logging middleware queries its tracer once per request; a `None`
/// answer means "no active span" and the request is forwarded without
/// trace headers.
///
/// ## Object Safety
///
/// This trait is object-safe and is typically shared as
/// `Arc<dyn Tracer>`.
///
/// ## Example
///
/// ```rust
/// use wiretap::{SpanContext, Tracer};
///
/// struct FixedTracer(SpanContext);
///
/// impl Tracer for FixedTracer {
///     fn current_span(&self) -> Option<SpanContext> {
///         Some(self.0.clone())
///     }
/// }
/// ```
pub trait Tracer: Send + Sync {
    /// Returns the propagation context of the current span, if one is
    /// active.
    fn current_span(&self) -> Option<SpanContext>;
}

/// A tracer that never reports an active span.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn current_span(&self) -> Option<SpanContext> {
        None
    }
}

/// A shared slot holding the currently active span context.
///
/// Server-side code sets the slot when it opens a span and clears it when
/// the span closes; middleware reads it through the [`Tracer`] impl. The
/// slot is safe to share across tasks (`Arc<CurrentSpan>`).
///
/// ## Example
///
/// ```rust
/// use wiretap::{CurrentSpan, SpanContext, Tracer};
///
/// let current = CurrentSpan::new();
/// assert!(current.current_span().is_none());
///
/// current.set(SpanContext::new_root());
/// assert!(current.current_span().is_some());
///
/// current.clear();
/// assert!(current.current_span().is_none());
/// ```
#[derive(Default)]
pub struct CurrentSpan {
    slot: RwLock<Option<SpanContext>>,
}

impl CurrentSpan {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the given context the current span.
    pub fn set(&self, context: SpanContext) {
        *self.slot.write() = Some(context);
    }

    /// Clears the current span.
    pub fn clear(&self) {
        *self.slot.write() = None;
    }
}

impl Tracer for CurrentSpan {
    fn current_span(&self) -> Option<SpanContext> {
        self.slot.read().clone()
    }
}

impl fmt::Debug for CurrentSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurrentSpan")
            .field("active", &self.slot.read().is_some())
            .finish()
    }
}

/// Injects a span's propagation headers into a header map.
///
/// Appends [`SENTRY_TRACE_HEADER`] always, and [`BAGGAGE_HEADER`] only
/// when the span carries baggage. A span without baggage adds no
/// placeholder baggage header; the asymmetry is part of the propagation
/// contract.
pub fn inject(span: &SpanContext, headers: &mut Headers) {
    headers.append(SENTRY_TRACE_HEADER, span.to_trace_header());

    if let Some(baggage) = span.baggage() {
        headers.append(BAGGAGE_HEADER, baggage);
    }
}
