//! The request/response logging middleware.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::config::{DEFAULT_MAX_BODY_TRACE, LogConfig};
use crate::error::SendError;
use crate::http::Request;
use crate::log::{ErrorInfo, LogRecord, LogSink, Outcome};
use crate::text::{body_excerpt, response_excerpt};
use crate::trace::{Tracer, inject};

use super::{Middleware, Next, ResponseFuture};

/// Middleware that logs every outgoing request/response pair.
///
/// Per attempt it:
///
/// 1. asks the [`Tracer`] for the current span and, when one is active,
///    appends `sentry-trace` (and `baggage`, when present) to the request;
/// 2. captures a truncated excerpt of the request body (the bytes sent are
///    unaffected; only a display copy is kept);
/// 3. delegates to the rest of the chain and measures elapsed wall-clock
///    time around it;
/// 4. on success, excerpts and rewinds the response body, emits one `info`
///    record, and returns the response unchanged;
/// 5. on failure, matches the [`SendError`] taxonomy exhaustively, emits
///    one `warning` record with whatever context the branch carries, and
///    re-raises the original failure.
///
/// The tracer, sink, and body limit are read-only after construction, so a
/// single instance serves any number of concurrent in-flight requests. A
/// failure inside the logging path never fails the request: emission is
/// isolated, and a sink that panics only loses that one record.
///
/// ## Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use url::Url;
/// use wiretap::{HttpSender, MiddlewareStack, NoopTracer, Request, RequestLogging, TracingSink};
///
/// # async fn run() -> Result<(), wiretap::SendError> {
/// let stack = MiddlewareStack::new()
///     .with(RequestLogging::new(Arc::new(NoopTracer), Arc::new(TracingSink)));
///
/// let sender = HttpSender::new();
/// let request = Request::new("GET", Url::parse("https://api.example.com/health").unwrap());
/// let response = stack
///     .process(request, move |req| async move { sender.send(req).await })
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct RequestLogging {
    tracer: Arc<dyn Tracer>,
    sink: Arc<dyn LogSink>,
    max_body: usize,
}

impl RequestLogging {
    /// Creates a logging middleware with the default body limit.
    pub fn new(tracer: Arc<dyn Tracer>, sink: Arc<dyn LogSink>) -> Self {
        Self {
            tracer,
            sink,
            max_body: DEFAULT_MAX_BODY_TRACE,
        }
    }

    /// Applies a [`LogConfig`] (builder pattern).
    #[must_use]
    pub fn with_config(mut self, config: &LogConfig) -> Self {
        self.max_body = config.resolved_max_body();
        self
    }

    /// Sets the body excerpt limit directly (builder pattern).
    #[must_use]
    pub fn with_max_body(mut self, max_body: usize) -> Self {
        self.max_body = max_body;
        self
    }

    /// Runs an emission against the sink, isolating the request from any
    /// failure in the logging path.
    fn emit(&self, emission: impl FnOnce(&dyn LogSink)) {
        let sink = &*self.sink;
        let _ = catch_unwind(AssertUnwindSafe(|| emission(sink)));
    }
}

impl Middleware for RequestLogging {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> ResponseFuture<'a> {
        Box::pin(async move {
            let mut request = req;
            if let Some(span) = self.tracer.current_span() {
                inject(&span, request.headers_mut());
            }

            let request_body = body_excerpt(request.body_mut(), self.max_body);

            let time = Utc::now();
            let start = Instant::now();
            let path = format!("{}:{}", request.method(), request.uri());
            let method = request.method().to_string();
            let request_headers = request.headers().clone();

            match next.call(request).await {
                Ok(mut response) => {
                    let response_body = response_excerpt(response.body_mut(), self.max_body);
                    let record = LogRecord::new(
                        time,
                        start.elapsed(),
                        Outcome::Success {
                            method,
                            request_headers,
                            response_headers: response.headers().clone(),
                            request_body,
                            response_body,
                        },
                    );
                    self.emit(|sink| sink.info(&path, &record));

                    Ok(response)
                }
                Err(mut failure) => {
                    let outcome = match &mut failure {
                        SendError::Response {
                            request,
                            response,
                            error,
                        } => Outcome::ResponseError {
                            method: request.method().to_string(),
                            request_headers: request.headers().clone(),
                            response_headers: response.headers().clone(),
                            request_body: request_body.clone(),
                            response_body: response_excerpt(response.body_mut(), self.max_body),
                            code: error.code(),
                            path: path.clone(),
                            error: ErrorInfo::from(&*error),
                        },
                        SendError::Connection { request, error } => Outcome::ConnectionError {
                            method: request.method().to_string(),
                            request_headers: request.headers().clone(),
                            request_body: request_body.clone(),
                            code: error.code(),
                            path: path.clone(),
                            error: ErrorInfo::from(&*error),
                        },
                        SendError::Other { error } => Outcome::OtherError {
                            request_body: request_body.clone(),
                            path: path.clone(),
                            error: ErrorInfo::from(&*error),
                        },
                    };
                    let record = LogRecord::new(time, start.elapsed(), outcome);
                    let message = failure.message().to_string();
                    self.emit(|sink| sink.warning(&message, &record));

                    Err(failure)
                }
            }
        })
    }
}

impl fmt::Debug for RequestLogging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLogging")
            .field("max_body", &self.max_body)
            .finish_non_exhaustive()
    }
}
