//! Error categorization for sender failures.

use std::fmt;

use serde::Serialize;

/// Categories of failure at the HTTP sender boundary.
///
/// The set is closed: every failure a sender can produce maps onto exactly
/// one kind, so callers can match exhaustively.
///
/// ## Example
///
/// ```rust
/// use wiretap::ErrorKind;
///
/// assert!(ErrorKind::Connection.is_transient());
/// assert!(!ErrorKind::Status.is_transient());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The connection could not be established (DNS, TCP, TLS).
    Connection,
    /// The request timed out before a response was obtained.
    Timeout,
    /// The transport completed but returned an error status.
    Status,
    /// The request could not be constructed or was rejected before sending.
    InvalidRequest,
    /// The response could not be read or decoded.
    Protocol,
    /// The middleware or sender was misconfigured.
    Configuration,
    /// Any failure outside the categories above.
    Other,
}

impl ErrorKind {
    /// Returns `true` for failures that may succeed on a later attempt.
    ///
    /// This layer performs no retries itself; the predicate exists for
    /// callers deciding what to do with a propagated failure.
    pub fn is_transient(&self) -> bool {
        matches!(self, ErrorKind::Connection | ErrorKind::Timeout)
    }

    /// Returns the kind as a stable lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Connection => "connection",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Status => "status",
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Other => "other",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(ErrorKind::Connection, true; "connection")]
    #[test_case(ErrorKind::Timeout, true; "timeout")]
    #[test_case(ErrorKind::Status, false; "status")]
    #[test_case(ErrorKind::InvalidRequest, false; "invalid request")]
    #[test_case(ErrorKind::Protocol, false; "protocol")]
    #[test_case(ErrorKind::Configuration, false; "configuration")]
    #[test_case(ErrorKind::Other, false; "other")]
    fn test_is_transient(kind: ErrorKind, expected: bool) {
        assert_eq!(kind.is_transient(), expected);
    }

    #[test]
    fn test_display_matches_as_str() {
        for kind in [
            ErrorKind::Connection,
            ErrorKind::Timeout,
            ErrorKind::Status,
            ErrorKind::InvalidRequest,
            ErrorKind::Protocol,
            ErrorKind::Configuration,
            ErrorKind::Other,
        ] {
            assert_eq!(format!("{}", kind), kind.as_str());
        }
    }

    #[test]
    fn test_serialize_snake_case() {
        let json = serde_json::to_string(&ErrorKind::InvalidRequest).unwrap();
        assert_eq!(json, "\"invalid_request\"");
    }
}
