//! Log sinks: where records go once built.

use std::sync::Arc;

use parking_lot::Mutex;

use super::LogRecord;

/// Destination for request log records.
///
/// The middleware emits exactly one record per attempt: `info` for a
/// successful response, `warning` for any failure. Sinks are shared
/// read-only across concurrent in-flight requests, so implementations must
/// be `Send + Sync`.
///
/// A sink must not fail the request it is observing; the middleware
/// isolates emission, and a sink that panics only loses that one record.
pub trait LogSink: Send + Sync {
    /// Records a successful attempt. `path` is `"{method}:{uri}"`.
    fn info(&self, path: &str, record: &LogRecord);

    /// Records a failed attempt. `message` is the failure's message.
    fn warning(&self, message: &str, record: &LogRecord);
}

/// A sink that emits through the `tracing` crate.
///
/// Success records go out at `INFO`, failures at `WARN`, both on the
/// `wiretap` target with the full record serialized to JSON in the
/// `record` field.
#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing")]
impl LogSink for TracingSink {
    fn info(&self, path: &str, record: &LogRecord) {
        let fields = serde_json::to_string(record).unwrap_or_default();
        tracing::info!(
            target: "wiretap",
            category = record.category,
            elapsed_ms = record.elapsed.as_millis() as u64,
            record = %fields,
            "{}",
            path
        );
    }

    fn warning(&self, message: &str, record: &LogRecord) {
        let fields = serde_json::to_string(record).unwrap_or_default();
        tracing::warn!(
            target: "wiretap",
            category = record.category,
            elapsed_ms = record.elapsed.as_millis() as u64,
            record = %fields,
            "{}",
            message
        );
    }
}

/// Emission level captured by [`MemorySink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkLevel {
    /// A successful attempt.
    Info,
    /// A failed attempt.
    Warning,
}

/// A single captured emission.
#[derive(Debug, Clone)]
pub struct Emission {
    /// The level the record was emitted at.
    pub level: SinkLevel,
    /// The path (info) or failure message (warning).
    pub message: String,
    /// The emitted record.
    pub record: LogRecord,
}

/// A sink that captures emissions in memory for assertions.
///
/// Cloning a `MemorySink` shares the captured list, so a test can hand one
/// clone to the middleware and keep another to inspect.
///
/// ## Example
///
/// ```rust
/// use wiretap::{LogSink, MemorySink};
///
/// let sink = MemorySink::new();
/// assert!(sink.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    emissions: Arc<Mutex<Vec<Emission>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything emitted so far.
    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions.lock().clone()
    }

    /// Returns the number of emissions.
    pub fn len(&self) -> usize {
        self.emissions.lock().len()
    }

    /// Returns `true` if nothing has been emitted.
    pub fn is_empty(&self) -> bool {
        self.emissions.lock().is_empty()
    }
}

impl LogSink for MemorySink {
    fn info(&self, path: &str, record: &LogRecord) {
        self.emissions.lock().push(Emission {
            level: SinkLevel::Info,
            message: path.to_string(),
            record: record.clone(),
        });
    }

    fn warning(&self, message: &str, record: &LogRecord) {
        self.emissions.lock().push(Emission {
            level: SinkLevel::Warning,
            message: message.to_string(),
            record: record.clone(),
        });
    }
}
