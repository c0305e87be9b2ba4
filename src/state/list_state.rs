//! List state and its pure transitions.
//!
//! [`ListState`] is the controller's single mutable aggregate. Every
//! transition is a method here so it can be tested without a fetcher.
//!
//! ```text
//! Idle(offset) ──begin_load──▶ Loading(offset)
//! Loading(offset) ──apply_page──▶ Idle(offset + limit)   if offset + limit < total
//!                              ─▶ Exhausted              otherwise
//! Loading(offset) ──apply_failure──▶ Idle(offset)
//! ```

use crate::model::FetchError;
use crate::source::PageRequest;
use crate::view_state::{ReviewItem, TextMeasurer};
use std::fmt;
use std::sync::Arc;

/// Loading phase of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// No fetch outstanding; more data may remain.
    #[default]
    Idle,
    /// One fetch outstanding.
    Loading,
    /// Every record has been loaded. Terminal until reset.
    Exhausted,
}

/// Shared, append-only item sequence.
pub type ItemList = Arc<Vec<Arc<ReviewItem>>>;

/// Pagination state of one list instance.
///
/// # Invariants
/// - `offset` only advances in `apply_page`, by exactly `limit`
/// - `items` is append-only
/// - at most one load is in flight (`phase == Loading`)
#[derive(Debug, Clone)]
pub struct ListState {
    items: ItemList,
    offset: usize,
    limit: usize,
    phase: LoadPhase,
    total_count: Option<usize>,
    last_error: Option<FetchError>,
    generation: u64,
}

impl ListState {
    /// Fresh state at offset 0. A zero page size is raised to 1.
    pub fn new(limit: usize) -> Self {
        Self {
            items: Arc::new(Vec::new()),
            offset: 0,
            limit: limit.max(1),
            phase: LoadPhase::Idle,
            total_count: None,
            last_error: None,
            generation: 0,
        }
    }

    /// Loaded items in fetch order.
    pub fn items(&self) -> &[Arc<ReviewItem>] {
        &self.items
    }

    /// Offset of the next page to load.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Page size.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Current phase.
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// True while a fetch is outstanding.
    pub fn load_in_flight(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    /// True once every record has been loaded.
    pub fn is_exhausted(&self) -> bool {
        self.phase == LoadPhase::Exhausted
    }

    /// Total count reported by the last successful page.
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    /// Error from the most recent failed load, cleared by the next success.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Reset counter; completions from older generations are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Enter `Loading` and return the page to fetch.
    ///
    /// Returns `None` (and changes nothing) when a load is already in flight
    /// or the list is exhausted.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.phase != LoadPhase::Idle {
            return None;
        }
        self.phase = LoadPhase::Loading;
        Some(PageRequest::new(self.offset, self.limit))
    }

    /// Append a successfully loaded page and advance the offset.
    ///
    /// Loading is re-armed only while `offset < total_count`.
    pub fn apply_page(&mut self, page: Vec<ReviewItem>, total_count: usize) {
        Arc::make_mut(&mut self.items).extend(page.into_iter().map(Arc::new));
        self.offset += self.limit;
        self.total_count = Some(total_count);
        self.last_error = None;
        self.phase = if self.offset < total_count {
            LoadPhase::Idle
        } else {
            LoadPhase::Exhausted
        };
    }

    /// Record a failed load; offset and items are left untouched.
    pub fn apply_failure(&mut self, error: FetchError) {
        self.last_error = Some(error);
        self.phase = LoadPhase::Idle;
    }

    /// Fresh state with the same page size and the next generation.
    pub fn reset(&self) -> Self {
        Self {
            generation: self.generation + 1,
            ..Self::new(self.limit)
        }
    }

    /// Immutable snapshot for observers.
    pub fn snapshot(&self, measurer: Arc<dyn TextMeasurer>) -> ListSnapshot {
        ListSnapshot {
            items: Arc::clone(&self.items),
            phase: self.phase,
            offset: self.offset,
            total_count: self.total_count,
            last_error: self.last_error.clone(),
            generation: self.generation,
            measurer,
        }
    }
}

/// Immutable view of a list handed to renderers.
///
/// Cloning is cheap: items are shared, not copied. A snapshot never observes
/// later appends.
#[derive(Clone)]
pub struct ListSnapshot {
    items: ItemList,
    phase: LoadPhase,
    offset: usize,
    total_count: Option<usize>,
    last_error: Option<FetchError>,
    generation: u64,
    measurer: Arc<dyn TextMeasurer>,
}

impl ListSnapshot {
    /// Items in fetch order.
    pub fn items(&self) -> &[Arc<ReviewItem>] {
        &self.items
    }

    /// Number of items.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Phase at snapshot time.
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Offset at snapshot time.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total count known at snapshot time.
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    /// Last load error at snapshot time.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Generation the snapshot was taken in.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Measurer the items are laid out with.
    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.measurer.as_ref()
    }
}

impl fmt::Debug for ListSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListSnapshot")
            .field("count", &self.items.len())
            .field("phase", &self.phase)
            .field("offset", &self.offset)
            .field("total_count", &self.total_count)
            .field("last_error", &self.last_error)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
