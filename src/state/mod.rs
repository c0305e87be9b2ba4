//! List state machine and the paginated list controller.
//!
//! State transitions are pure methods on [`ListState`], testable without a
//! fetcher. [`ReviewsController`] wires them to a [`PageFetcher`](crate::source::PageFetcher).

pub mod controller;
pub mod list_state;
pub mod scroll_trigger;

// Re-export for convenience
pub use controller::{ListObserver, ListSettings, ReviewsController, DEFAULT_PAGE_SIZE};
pub use list_state::{ItemList, ListSnapshot, ListState, LoadPhase};
pub use scroll_trigger::{should_load_next_page, ScrollMetrics, DEFAULT_SCREENS_AHEAD};
