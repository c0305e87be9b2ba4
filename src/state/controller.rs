//! Paginated review list controller.
//!
//! Owns the list state, issues page fetches and applies their results.
//! Fetch completions may arrive on any thread; they are queued on a channel
//! and only applied when the owner calls [`ReviewsController::process_completions`]
//! or [`ReviewsController::wait_for_completion`], so every mutation and every
//! observer notification happens on the owner's thread.

use super::list_state::{ListSnapshot, ListState, LoadPhase};
use super::scroll_trigger::{should_load_next_page, ScrollMetrics, DEFAULT_SCREENS_AHEAD};
use crate::model::FetchError;
use crate::parser;
use crate::source::{FetchResult, PageFetcher, PageRequest};
use crate::view::{ListAdapter, RenderableItem};
use crate::view_state::{ReviewItem, TextMeasurer};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Tunables of a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListSettings {
    /// Records requested per page.
    pub page_size: usize,
    /// Line limit applied to review bodies.
    pub max_body_lines: usize,
    /// Load-more trigger distance in viewport heights.
    pub screens_ahead: f64,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_body_lines: ReviewItem::DEFAULT_MAX_LINES,
            screens_ahead: DEFAULT_SCREENS_AHEAD,
        }
    }
}

/// Receives a snapshot after every applied load result and after reset.
pub trait ListObserver {
    /// Called on the owner's thread with the list as it is now.
    fn on_list_changed(&mut self, snapshot: &ListSnapshot);
}

impl<F> ListObserver for F
where
    F: FnMut(&ListSnapshot),
{
    fn on_list_changed(&mut self, snapshot: &ListSnapshot) {
        self(snapshot)
    }
}

/// A fetch result tagged with the generation that requested it.
struct PageCompletion {
    generation: u64,
    request: PageRequest,
    result: FetchResult,
}

/// Controller for an infinitely scrolling review list.
///
/// # Guarantees
///
/// - At most one fetch is logically in flight per generation
/// - Items are only appended, in fetch order
/// - A failed load leaves offset and items untouched and re-arms loading
/// - Once exhausted, no further fetches are issued until [`reset`](Self::reset)
pub struct ReviewsController<F: PageFetcher> {
    state: ListState,
    settings: ListSettings,
    fetcher: F,
    measurer: Arc<dyn TextMeasurer>,
    completions_tx: Sender<PageCompletion>,
    completions: Receiver<PageCompletion>,
    observer: Option<Box<dyn ListObserver>>,
    fetches_issued: usize,
}

impl<F: PageFetcher> ReviewsController<F> {
    /// Create a controller in the `Idle` state at offset 0.
    ///
    /// No fetch is issued until [`request_more`](Self::request_more) or
    /// [`on_scroll`](Self::on_scroll) is called.
    pub fn new(fetcher: F, measurer: Arc<dyn TextMeasurer>, settings: ListSettings) -> Self {
        let (completions_tx, completions) = mpsc::channel();
        Self {
            state: ListState::new(settings.page_size),
            settings,
            fetcher,
            measurer,
            completions_tx,
            completions,
            observer: None,
            fetches_issued: 0,
        }
    }

    /// Register the change listener, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl ListObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Remove the change listener.
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Current list state.
    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Settings the controller was created with.
    pub fn settings(&self) -> ListSettings {
        self.settings
    }

    /// Measurer used for item heights.
    pub fn measurer(&self) -> &Arc<dyn TextMeasurer> {
        &self.measurer
    }

    /// Fetcher backing the list.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Number of fetches issued over the controller's lifetime.
    pub fn fetches_issued(&self) -> usize {
        self.fetches_issued
    }

    /// Immutable snapshot of the list.
    pub fn snapshot(&self) -> ListSnapshot {
        self.state.snapshot(Arc::clone(&self.measurer))
    }

    /// Number of loaded items.
    pub fn item_count(&self) -> usize {
        self.state.items().len()
    }

    /// Item at `index`, if loaded.
    pub fn item(&self, index: usize) -> Option<&Arc<ReviewItem>> {
        self.state.items().get(index)
    }

    /// Request the next page.
    ///
    /// Returns `true` if a fetch was issued. A no-op while a load is in
    /// flight or once every record has been loaded.
    pub fn request_more(&mut self) -> bool {
        let Some(request) = self.state.begin_load() else {
            debug!(phase = ?self.state.phase(), "Ignoring load request");
            return false;
        };

        let generation = self.state.generation();
        let tx = self.completions_tx.clone();
        self.fetches_issued += 1;

        debug!(
            offset = request.offset,
            limit = request.limit,
            generation,
            "Requesting page"
        );

        self.fetcher.fetch(
            request,
            Box::new(move |result| {
                // The receiver only disappears with the controller itself.
                let _ = tx.send(PageCompletion {
                    generation,
                    request,
                    result,
                });
            }),
        );
        true
    }

    /// Scroll hook: request the next page once the remaining content falls
    /// within the configured number of screens.
    ///
    /// Returns `true` if a fetch was issued.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        self.on_scroll_with_threshold(metrics, self.settings.screens_ahead)
    }

    /// [`on_scroll`](Self::on_scroll) with an explicit threshold.
    pub fn on_scroll_with_threshold(&mut self, metrics: ScrollMetrics, screens_ahead: f64) -> bool {
        if !should_load_next_page(metrics, screens_ahead) {
            return false;
        }
        self.request_more()
    }

    /// Apply every completion that has arrived so far.
    ///
    /// Returns the number of completions applied; stale ones are discarded
    /// and not counted.
    pub fn process_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions.try_recv() {
            if self.apply_completion(completion) {
                applied += 1;
            }
        }
        applied
    }

    /// Block until a completion for the current generation is applied or
    /// `timeout` elapses. Completions already queued behind it are applied too.
    ///
    /// A timeout too large to represent as a deadline (such as
    /// [`Duration::MAX`]) waits without limit.
    ///
    /// Returns `true` if at least one completion was applied.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now().checked_add(timeout);
        loop {
            let received = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    self.completions.recv_timeout(remaining).ok()
                }
                None => self.completions.recv().ok(),
            };
            let Some(completion) = received else {
                return false;
            };
            if self.apply_completion(completion) {
                self.process_completions();
                return true;
            }
        }
    }

    /// Discard all items and start over at offset 0.
    ///
    /// Completions of fetches issued before the reset are dropped when they
    /// arrive.
    pub fn reset(&mut self) {
        self.state = self.state.reset();
        info!(generation = self.state.generation(), "List reset");
        self.notify();
    }

    /// Apply one completion. Returns `false` if it was discarded.
    fn apply_completion(&mut self, completion: PageCompletion) -> bool {
        if completion.generation != self.state.generation() {
            debug!(
                completion_generation = completion.generation,
                generation = self.state.generation(),
                "Discarding stale page"
            );
            return false;
        }
        if self.state.phase() != LoadPhase::Loading {
            warn!(
                offset = completion.request.offset,
                phase = ?self.state.phase(),
                "Discarding unexpected page"
            );
            return false;
        }

        let outcome = completion
            .result
            .map_err(FetchError::from)
            .and_then(|payload| parser::decode_page(&payload).map_err(FetchError::from));

        match outcome {
            Ok(page) => {
                let received = page.items.len();
                let items = page
                    .items
                    .iter()
                    .map(|record| ReviewItem::from_record(record, self.settings.max_body_lines))
                    .collect();
                self.state.apply_page(items, page.count);
                info!(
                    offset = completion.request.offset,
                    received,
                    total = page.count,
                    loaded = self.state.items().len(),
                    "Page loaded"
                );
                if self.state.is_exhausted() {
                    info!(loaded = self.state.items().len(), "All reviews loaded");
                }
            }
            Err(err) => {
                warn!(
                    offset = completion.request.offset,
                    error = %err,
                    "Page load failed"
                );
                self.state.apply_failure(err);
            }
        }

        self.notify();
        true
    }

    fn notify(&mut self) {
        if self.observer.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(observer) = self.observer.as_mut() {
            observer.on_list_changed(&snapshot);
        }
    }
}

impl<F: PageFetcher> ListAdapter for ReviewsController<F> {
    fn item_count(&self) -> usize {
        self.state.items().len()
    }

    fn item_at(&self, index: usize) -> Option<&dyn RenderableItem> {
        self.state
            .items()
            .get(index)
            .map(|item| &**item as &dyn RenderableItem)
    }

    fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }
}

impl ListAdapter for ListSnapshot {
    fn item_count(&self) -> usize {
        self.count()
    }

    fn item_at(&self, index: usize) -> Option<&dyn RenderableItem> {
        self.items()
            .get(index)
            .map(|item| &**item as &dyn RenderableItem)
    }

    fn measurer(&self) -> &dyn TextMeasurer {
        ListSnapshot::measurer(self)
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
