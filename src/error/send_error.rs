//! The closed failure taxonomy at the sender boundary.

use std::error::Error as StdError;
use std::fmt;

use crate::http::{Request, Response};

use super::Error;

/// A sender failure, classified by how much context survived it.
///
/// The taxonomy is closed and meant to be matched exhaustively:
///
/// - [`SendError::Response`]: the transport completed but yielded an error
///   status; both the request and the response are available.
/// - [`SendError::Connection`]: no response was ever obtained (DNS, TCP,
///   TLS failure, timeout); only the request is available.
/// - [`SendError::Other`]: any other failure, with minimal context.
///
/// Middleware observes these failures and re-raises them unchanged; the
/// variant a caller awaits is the variant the sender produced.
#[derive(Debug)]
pub enum SendError {
    /// Transport completed with an error status.
    Response {
        /// The request as it was sent.
        request: Request,
        /// The response that carried the error status.
        response: Response,
        /// The classified failure.
        error: Error,
    },
    /// No response was obtained.
    Connection {
        /// The request that never completed.
        request: Request,
        /// The classified failure.
        error: Error,
    },
    /// Any other failure.
    Other {
        /// The classified failure.
        error: Error,
    },
}

impl SendError {
    /// Returns the inner classified error.
    pub fn error(&self) -> &Error {
        match self {
            SendError::Response { error, .. }
            | SendError::Connection { error, .. }
            | SendError::Other { error } => error,
        }
    }

    /// Returns the human-readable failure message.
    pub fn message(&self) -> &str {
        self.error().message()
    }

    /// Returns the request attached to this failure, if any.
    pub fn request(&self) -> Option<&Request> {
        match self {
            SendError::Response { request, .. } | SendError::Connection { request, .. } => {
                Some(request)
            }
            SendError::Other { .. } => None,
        }
    }

    /// Returns the response attached to this failure, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            SendError::Response { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns `true` if this is a response-level failure.
    pub fn is_response(&self) -> bool {
        matches!(self, SendError::Response { .. })
    }

    /// Returns `true` if this is a connection-level failure.
    pub fn is_connection(&self) -> bool {
        matches!(self, SendError::Connection { .. })
    }

    /// Returns `true` if this is an unclassified failure.
    pub fn is_other(&self) -> bool {
        matches!(self, SendError::Other { .. })
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error())
    }
}

impl StdError for SendError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.error())
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;

    fn request() -> Request {
        Request::new("GET", Url::parse("https://example.com/x").unwrap())
    }

    #[test]
    fn test_response_variant_accessors() {
        let err = SendError::Response {
            request: request(),
            response: Response::new(500),
            error: Error::status(500, "HTTP status 500"),
        };
        assert!(err.is_response());
        assert!(err.request().is_some());
        assert_eq!(err.response().map(Response::status), Some(500));
        assert_eq!(err.error().code(), Some(500));
    }

    #[test]
    fn test_connection_variant_accessors() {
        let err = SendError::Connection {
            request: request(),
            error: Error::connection("refused"),
        };
        assert!(err.is_connection());
        assert!(err.request().is_some());
        assert!(err.response().is_none());
        assert_eq!(err.message(), "refused");
    }

    #[test]
    fn test_other_variant_accessors() {
        let err = SendError::Other {
            error: Error::other("mystery"),
        };
        assert!(err.is_other());
        assert!(err.request().is_none());
        assert!(err.response().is_none());
    }

    #[test]
    fn test_display_delegates_to_error() {
        let err = SendError::Other {
            error: Error::timeout("deadline exceeded"),
        };
        assert_eq!(err.to_string(), "timeout: deadline exceeded");
    }

    #[test]
    fn test_source_is_inner_error() {
        let err = SendError::Other {
            error: Error::other("x"),
        };
        assert!(StdError::source(&err).is_some());
    }
}
