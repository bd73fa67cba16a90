//! The structured record emitted once per request attempt.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::error::{Error, ErrorKind};
use crate::http::Headers;

/// Category tag carried by every record.
///
/// The literal is kept verbatim for compatibility with log pipelines keyed
/// on the category of the system this crate replaces.
pub const CATEGORY: &str = "guzzle.request";

/// One request attempt's log record.
///
/// A record is constructed once per attempt, handed to a
/// [`LogSink`](super::LogSink), and then dropped; nothing retains it.
/// The field set is fixed per outcome branch; see [`Outcome`].
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    /// Wall-clock time at which the attempt started.
    pub time: DateTime<Utc>,
    /// Elapsed time from start to settlement.
    #[serde(serialize_with = "serialize_elapsed")]
    pub elapsed: Duration,
    /// The constant [`CATEGORY`] tag.
    pub category: &'static str,
    /// The outcome-specific fields.
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl LogRecord {
    /// Creates a record for the given attempt outcome.
    pub fn new(time: DateTime<Utc>, elapsed: Duration, outcome: Outcome) -> Self {
        Self {
            time,
            elapsed,
            category: CATEGORY,
            outcome,
        }
    }
}

fn serialize_elapsed<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Outcome-specific record fields, one fixed shape per branch.
///
/// Response-side fields are structurally absent on the branches that never
/// obtained a response; their absence is encoded by the variant shape, not
/// by an optional key.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// The sender produced a response.
    Success {
        /// Request method.
        method: String,
        /// Request headers as sent (after any trace injection).
        request_headers: Headers,
        /// Response headers.
        response_headers: Headers,
        /// Truncated request body excerpt.
        request_body: String,
        /// Truncated response body excerpt.
        response_body: String,
    },
    /// The sender failed with a response attached.
    ResponseError {
        /// Request method.
        method: String,
        /// Request headers as sent.
        request_headers: Headers,
        /// Response headers.
        response_headers: Headers,
        /// Truncated request body excerpt.
        request_body: String,
        /// Truncated response body excerpt.
        response_body: String,
        /// Numeric error code, where one exists.
        code: Option<u16>,
        /// `"{method}:{uri}"` of the attempt.
        path: String,
        /// Snapshot of the failure.
        error: ErrorInfo,
    },
    /// The sender failed before any response was obtained.
    ConnectionError {
        /// Request method.
        method: String,
        /// Request headers as sent.
        request_headers: Headers,
        /// Truncated request body excerpt.
        request_body: String,
        /// Numeric error code, where one exists.
        code: Option<u16>,
        /// `"{method}:{uri}"` of the attempt.
        path: String,
        /// Snapshot of the failure.
        error: ErrorInfo,
    },
    /// The sender failed in an unclassified way.
    OtherError {
        /// Truncated request body excerpt.
        request_body: String,
        /// `"{method}:{uri}"` of the attempt.
        path: String,
        /// Snapshot of the failure.
        error: ErrorInfo,
    },
}

impl Outcome {
    /// Returns `true` for the success branch.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Returns the request method, where the branch carries one.
    pub fn method(&self) -> Option<&str> {
        match self {
            Outcome::Success { method, .. }
            | Outcome::ResponseError { method, .. }
            | Outcome::ConnectionError { method, .. } => Some(method),
            Outcome::OtherError { .. } => None,
        }
    }

    /// Returns the request headers, where the branch carries them.
    pub fn request_headers(&self) -> Option<&Headers> {
        match self {
            Outcome::Success {
                request_headers, ..
            }
            | Outcome::ResponseError {
                request_headers, ..
            }
            | Outcome::ConnectionError {
                request_headers, ..
            } => Some(request_headers),
            Outcome::OtherError { .. } => None,
        }
    }

    /// Returns the response headers, where a response was obtained.
    pub fn response_headers(&self) -> Option<&Headers> {
        match self {
            Outcome::Success {
                response_headers, ..
            }
            | Outcome::ResponseError {
                response_headers, ..
            } => Some(response_headers),
            _ => None,
        }
    }

    /// Returns the request body excerpt (present on every branch).
    pub fn request_body(&self) -> &str {
        match self {
            Outcome::Success { request_body, .. }
            | Outcome::ResponseError { request_body, .. }
            | Outcome::ConnectionError { request_body, .. }
            | Outcome::OtherError { request_body, .. } => request_body,
        }
    }

    /// Returns the response body excerpt, where a response was obtained.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Outcome::Success { response_body, .. }
            | Outcome::ResponseError { response_body, .. } => Some(response_body),
            _ => None,
        }
    }

    /// Returns the `"{method}:{uri}"` path on failure branches.
    pub fn path(&self) -> Option<&str> {
        match self {
            Outcome::ResponseError { path, .. }
            | Outcome::ConnectionError { path, .. }
            | Outcome::OtherError { path, .. } => Some(path),
            Outcome::Success { .. } => None,
        }
    }

    /// Returns the captured failure snapshot on failure branches.
    pub fn error(&self) -> Option<&ErrorInfo> {
        match self {
            Outcome::ResponseError { error, .. }
            | Outcome::ConnectionError { error, .. }
            | Outcome::OtherError { error, .. } => Some(error),
            Outcome::Success { .. } => None,
        }
    }
}

/// A serializable snapshot of a failure.
///
/// The failure value itself is re-raised to the caller unchanged; records
/// carry this copy instead so they stay owned and serializable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    /// The failure category.
    pub kind: ErrorKind,
    /// The human-readable failure message.
    pub message: String,
    /// Numeric code, where the failure has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl From<&Error> for ErrorInfo {
    fn from(error: &Error) -> Self {
        Self {
            kind: error.kind(),
            message: error.message().to_string(),
            code: error.code(),
        }
    }
}
