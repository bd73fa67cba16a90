//! Resolving the "current" server request.
//!
//! Error-context enrichment wants to know which inbound request was being
//! served when something went wrong. [`RequestStore`] is a shared slot the
//! serving layer fills in as requests begin and end; [`StoreFetcher`]
//! resolves from that slot, falling back to a secondary fetcher when the
//! slot is empty.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::http::Request;

/// Source of the current server request.
///
/// Implementations answer "which inbound request is being served right
/// now", or `None` when there is no way to know.
///
/// ## Object Safety
///
/// This trait is object-safe and is typically shared as
/// `Box<dyn RequestFetcher>` or `Arc<dyn RequestFetcher>`.
pub trait RequestFetcher: Send + Sync {
    /// Returns the current server request, if one can be resolved.
    fn fetch_request(&self) -> Option<Request>;
}

/// A fetcher that never resolves a request.
///
/// Useful as the terminal fallback of a fetcher chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFetcher;

impl RequestFetcher for NoopFetcher {
    fn fetch_request(&self) -> Option<Request> {
        None
    }
}

/// A shared slot holding the request currently being served.
///
/// The serving layer calls [`set`](RequestStore::set) when it starts
/// handling a request and [`clear`](RequestStore::clear) when it finishes.
/// The slot is safe to share across tasks (`Arc<RequestStore>`).
#[derive(Default)]
pub struct RequestStore {
    slot: RwLock<Option<Request>>,
}

impl RequestStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the given request the current one.
    pub fn set(&self, request: Request) {
        *self.slot.write() = Some(request);
    }

    /// Clears the current request.
    pub fn clear(&self) {
        *self.slot.write() = None;
    }

    /// Returns a copy of the current request, if any.
    pub fn get(&self) -> Option<Request> {
        self.slot.read().clone()
    }
}

impl fmt::Debug for RequestStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestStore")
            .field("occupied", &self.slot.read().is_some())
            .finish()
    }
}

/// A fetcher backed by a [`RequestStore`], with an optional fallback.
///
/// Resolution order: the store first; when it is empty, the fallback
/// fetcher (if configured). Mirrors "ask the container, else ask the SDK
/// default".
///
/// ## Example
///
/// ```rust
/// use std::sync::Arc;
/// use url::Url;
/// use wiretap::{NoopFetcher, Request, RequestFetcher, RequestStore, StoreFetcher};
///
/// let store = Arc::new(RequestStore::new());
/// let fetcher = StoreFetcher::new(store.clone()).with_fallback(Box::new(NoopFetcher));
///
/// assert!(fetcher.fetch_request().is_none());
///
/// store.set(Request::new("GET", Url::parse("https://example.com/").unwrap()));
/// assert!(fetcher.fetch_request().is_some());
/// ```
pub struct StoreFetcher {
    store: Arc<RequestStore>,
    fallback: Option<Box<dyn RequestFetcher>>,
}

impl StoreFetcher {
    /// Creates a fetcher over the given store with no fallback.
    pub fn new(store: Arc<RequestStore>) -> Self {
        Self {
            store,
            fallback: None,
        }
    }

    /// Sets the fallback consulted when the store is empty.
    #[must_use]
    pub fn with_fallback(mut self, fallback: Box<dyn RequestFetcher>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl RequestFetcher for StoreFetcher {
    fn fetch_request(&self) -> Option<Request> {
        self.store
            .get()
            .or_else(|| self.fallback.as_ref().and_then(|f| f.fetch_request()))
    }
}

impl fmt::Debug for StoreFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreFetcher")
            .field("store", &self.store)
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}
