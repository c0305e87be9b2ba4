//! Local paged review source.
//!
//! Serves pages of a fixed record set (loaded from a JSON file or supplied
//! in memory) on worker threads, optionally with simulated latency and
//! injected failures.

use super::{FetchCallback, FetchResult, PageFetcher, PageRequest};
use crate::model::{InputError, ReviewRecord, TransportError};
use crate::parser;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// Paged fetcher backed by a local record set.
///
/// # Design
///
/// - Each `fetch` spawns one worker thread that sleeps `latency`, encodes the
///   page as a wire payload and invokes the callback
/// - Payloads always report `count` = size of the whole record set
/// - With `fail_every(n)`, every n-th request fails with
///   [`TransportError::Injected`]
#[derive(Debug)]
pub struct LocalReviewSource {
    records: Arc<[ReviewRecord]>,
    latency: Duration,
    fail_every: Option<usize>,
    requests: AtomicUsize,
}

impl LocalReviewSource {
    /// Serve the given records.
    pub fn new(records: Vec<ReviewRecord>) -> Self {
        Self {
            records: records.into(),
            latency: Duration::ZERO,
            fail_every: None,
            requests: AtomicUsize::new(0),
        }
    }

    /// Load records from a JSON file holding either an array of reviews or a
    /// page object.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist,
    /// `InputError::InvalidData` if it does not decode and `InputError::Io`
    /// for other I/O errors.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read(path)?;
        let records =
            parser::decode_records(&contents).map_err(|source| InputError::InvalidData {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), records = records.len(), "Loaded local review data");
        Ok(Self::new(records))
    }

    /// Delay every response by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail every `n`-th request. `0` disables failure injection.
    pub fn with_failure_every(mut self, n: usize) -> Self {
        self.fail_every = (n > 0).then_some(n);
        self
    }

    /// Number of records served.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of fetches started so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Encode the page for `request` synchronously.
    ///
    /// Offsets past the end produce an empty page.
    pub fn page_payload(&self, request: PageRequest) -> FetchResult {
        encode_window(&self.records, request)
    }
}

impl PageFetcher for LocalReviewSource {
    fn fetch(&self, request: PageRequest, on_complete: FetchCallback) {
        let sequence = self.requests.fetch_add(1, Ordering::SeqCst) + 1;
        let inject_failure = self.fail_every.is_some_and(|n| sequence % n == 0);
        let records = Arc::clone(&self.records);
        let latency = self.latency;

        debug!(
            offset = request.offset,
            limit = request.limit,
            sequence,
            inject_failure,
            "Starting local page fetch"
        );

        // Shared so the callback can still be completed if the thread fails to spawn.
        let slot = Arc::new(Mutex::new(Some(on_complete)));
        let worker_slot = Arc::clone(&slot);

        let spawned = std::thread::Builder::new()
            .name("review-fetch".to_string())
            .spawn(move || {
                if !latency.is_zero() {
                    std::thread::sleep(latency);
                }
                let result = if inject_failure {
                    Err(TransportError::Injected { request: sequence })
                } else {
                    encode_window(&records, request)
                };
                complete(&worker_slot, result);
            });

        if let Err(err) = spawned {
            warn!(error = %err, "Failed to spawn fetch worker");
            complete(
                &slot,
                Err(TransportError::Unavailable {
                    reason: err.to_string(),
                }),
            );
        }
    }
}

fn complete(slot: &Mutex<Option<FetchCallback>>, result: FetchResult) {
    let callback = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(callback) = callback {
        callback(result);
    }
}

fn encode_window(records: &[ReviewRecord], request: PageRequest) -> FetchResult {
    let start = request.offset.min(records.len());
    let end = request.offset.saturating_add(request.limit).min(records.len());
    parser::encode_page(&records[start..end], records.len()).map_err(|err| {
        TransportError::Unavailable {
            reason: err.to_string(),
        }
    })
}
