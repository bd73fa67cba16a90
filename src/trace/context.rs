//! Span context and trace/span identifiers.

use std::fmt;

/// A span's propagation context.
///
/// Carries the identifiers and metadata that outgoing requests propagate:
/// the trace header value (`"{trace_id}-{span_id}"`, with an optional
/// sampled flag) and, when present, a baggage string of vendor-neutral
/// key-value metadata.
///
/// ## Example
///
/// ```rust
/// use wiretap::SpanContext;
///
/// let ctx = SpanContext::parse("4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-1").unwrap();
/// assert_eq!(ctx.sampled(), Some(true));
/// assert_eq!(
///     ctx.to_trace_header(),
///     "4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanContext {
    /// The trace ID (16 bytes).
    trace_id: TraceId,
    /// The span ID (8 bytes).
    span_id: SpanId,
    /// Sampling decision; unset decisions are omitted from the header.
    sampled: Option<bool>,
    /// Baggage propagated alongside the trace header.
    baggage: Option<String>,
}

impl SpanContext {
    /// Creates a context with the given identifiers and no sampling
    /// decision.
    pub fn new(trace_id: TraceId, span_id: SpanId) -> Self {
        Self {
            trace_id,
            span_id,
            sampled: None,
            baggage: None,
        }
    }

    /// Creates a new root context with random identifiers.
    pub fn new_root() -> Self {
        Self::new(TraceId::random(), SpanId::random())
    }

    /// Creates a child context: same trace and baggage, fresh span ID.
    pub fn child(&self) -> Self {
        Self {
            trace_id: self.trace_id.clone(),
            span_id: SpanId::random(),
            sampled: self.sampled,
            baggage: self.baggage.clone(),
        }
    }

    /// Parses a trace header value.
    ///
    /// Accepts `"{trace_id}-{span_id}"` and
    /// `"{trace_id}-{span_id}-{0|1}"`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use wiretap::SpanContext;
    ///
    /// let ctx = SpanContext::parse("4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7").unwrap();
    /// assert_eq!(ctx.sampled(), None);
    /// ```
    pub fn parse(header: &str) -> Result<Self, TraceParseError> {
        let parts: Vec<&str> = header.split('-').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(TraceParseError::InvalidFormat);
        }

        let trace_id = TraceId::from_hex(parts[0])?;
        let span_id = SpanId::from_hex(parts[1])?;

        let sampled = match parts.get(2) {
            None => None,
            Some(&"1") => Some(true),
            Some(&"0") => Some(false),
            Some(_) => return Err(TraceParseError::InvalidSampled),
        };

        Ok(Self {
            trace_id,
            span_id,
            sampled,
            baggage: None,
        })
    }

    /// Returns the trace header value for this context.
    pub fn to_trace_header(&self) -> String {
        match self.sampled {
            Some(true) => format!("{}-{}-1", self.trace_id, self.span_id),
            Some(false) => format!("{}-{}-0", self.trace_id, self.span_id),
            None => format!("{}-{}", self.trace_id, self.span_id),
        }
    }

    /// Returns the trace ID.
    pub fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }

    /// Returns the span ID.
    pub fn span_id(&self) -> &SpanId {
        &self.span_id
    }

    /// Returns the sampling decision, if one was made.
    pub fn sampled(&self) -> Option<bool> {
        self.sampled
    }

    /// Sets the sampling decision.
    #[must_use]
    pub fn with_sampled(mut self, sampled: bool) -> Self {
        self.sampled = Some(sampled);
        self
    }

    /// Sets the baggage string.
    #[must_use]
    pub fn with_baggage(mut self, baggage: impl Into<String>) -> Self {
        self.baggage = Some(baggage.into());
        self
    }

    /// Returns the baggage string, if any.
    pub fn baggage(&self) -> Option<&str> {
        self.baggage.as_deref()
    }
}

impl fmt::Display for SpanContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_trace_header())
    }
}

/// A 128-bit trace identifier.
#[derive(Clone, PartialEq, Eq)]
pub struct TraceId([u8; 16]);

impl TraceId {
    /// Creates a new random trace ID.
    pub fn random() -> Self {
        let mut bytes = [0u8; 16];
        getrandom::getrandom(&mut bytes).expect("Failed to generate random bytes");
        Self(bytes)
    }

    /// Creates a trace ID from bytes.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates a trace ID from a hex string.
    pub fn from_hex(hex: &str) -> Result<Self, TraceParseError> {
        if hex.len() != 32 {
            return Err(TraceParseError::InvalidTraceId);
        }
        let mut bytes = [0u8; 16];
        hex::decode_to_slice(hex, &mut bytes).map_err(|_| TraceParseError::InvalidTraceId)?;

        // All-zero IDs are the protocol's "absent" value.
        if bytes == [0u8; 16] {
            return Err(TraceParseError::InvalidTraceId);
        }

        Ok(Self(bytes))
    }

    /// Returns the trace ID as bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Debug for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TraceId({})", self)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// A 64-bit span identifier.
#[derive(Clone, PartialEq, Eq)]
pub struct SpanId([u8; 8]);

impl SpanId {
    /// Creates a new random span ID.
    pub fn random() -> Self {
        let mut bytes = [0u8; 8];
        getrandom::getrandom(&mut bytes).expect("Failed to generate random bytes");
        Self(bytes)
    }

    /// Creates a span ID from bytes.
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Creates a span ID from a hex string.
    pub fn from_hex(hex: &str) -> Result<Self, TraceParseError> {
        if hex.len() != 16 {
            return Err(TraceParseError::InvalidSpanId);
        }
        let mut bytes = [0u8; 8];
        hex::decode_to_slice(hex, &mut bytes).map_err(|_| TraceParseError::InvalidSpanId)?;

        // All-zero IDs are the protocol's "absent" value.
        if bytes == [0u8; 8] {
            return Err(TraceParseError::InvalidSpanId);
        }

        Ok(Self(bytes))
    }

    /// Returns the span ID as bytes.
    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl fmt::Debug for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpanId({})", self)
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Error parsing a trace header.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceParseError {
    /// The header does not have two or three dash-separated parts.
    #[error("invalid trace header format")]
    InvalidFormat,
    /// The trace ID is not 32 hex characters or is all zeros.
    #[error("invalid trace ID")]
    InvalidTraceId,
    /// The span ID is not 16 hex characters or is all zeros.
    #[error("invalid span ID")]
    InvalidSpanId,
    /// The sampled flag is not `0` or `1`.
    #[error("invalid sampled flag")]
    InvalidSampled,
}
