//! Paged review sources.
//!
//! This module provides the fetch-client seam consumed by the list controller:
//! - [`PageFetcher`] trait: fire-and-forget page fetch with a completion callback
//! - [`LocalReviewSource`]: pages served from a file or in-memory record set on
//!   worker threads
//! - [`synthetic_records`]: deterministic sample data

use crate::model::TransportError;

pub mod local;
pub mod synthetic;

pub use local::LocalReviewSource;
pub use synthetic::synthetic_records;

/// Page window requested from a fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    /// Index of the first record.
    pub offset: usize,
    /// Page size.
    pub limit: usize,
}

impl PageRequest {
    /// Create a request for `limit` records starting at `offset`.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }
}

/// Outcome of a fetch: the raw page payload or a transport failure.
pub type FetchResult = Result<Vec<u8>, TransportError>;

/// Completion callback handed to [`PageFetcher::fetch`].
///
/// May be invoked on any thread, at most once.
pub type FetchCallback = Box<dyn FnOnce(FetchResult) + Send + 'static>;

/// Asynchronous paged fetch client.
///
/// `fetch` must not block on the network; it starts the request and returns.
/// The payload is decoded by the caller, so malformed payloads surface as
/// decode errors at the controller boundary.
pub trait PageFetcher {
    /// Start fetching `request`; call `on_complete` when it resolves.
    fn fetch(&self, request: PageRequest, on_complete: FetchCallback);
}

impl<F: PageFetcher + ?Sized> PageFetcher for std::sync::Arc<F> {
    fn fetch(&self, request: PageRequest, on_complete: FetchCallback) {
        (**self).fetch(request, on_complete)
    }
}
