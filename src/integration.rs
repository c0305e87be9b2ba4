//! Headless scroll driver.
//!
//! Drives a [`ReviewsController`] the way a user flinging to the bottom of
//! the list would, without a UI. Used by the binary and by end-to-end tests.

use crate::model::{FetchError, Size};
use crate::source::PageFetcher;
use crate::state::{ReviewsController, ScrollMetrics};
use crate::view::ListAdapter;
use std::time::Duration;
use tracing::{info, warn};

/// Outcome of [`simulate_scroll`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollReport {
    /// Scroll gestures performed.
    pub steps: usize,
    /// Fetches issued during the run.
    pub fetches_issued: usize,
    /// Loads that resolved with an error.
    pub failures: usize,
    /// Items loaded when the run ended.
    pub item_count: usize,
    /// Content height at the viewport width when the run ended.
    pub content_height: f64,
    /// True if every record was loaded.
    pub exhausted: bool,
    /// True if the run stopped because a fetch did not complete in time.
    pub timed_out: bool,
    /// Most recent load error, if the last load failed.
    pub last_error: Option<FetchError>,
}

/// Scroll to the bottom repeatedly until the list is exhausted or
/// `max_steps` gestures have been made.
///
/// Starts with one explicit `request_more`. Each step then sets the target
/// offset to the bottom of the current content and calls `on_scroll`.
/// Every fetch is awaited for at most `wait`.
pub fn simulate_scroll<F: PageFetcher>(
    controller: &mut ReviewsController<F>,
    viewport: Size,
    max_steps: usize,
    wait: Duration,
) -> ScrollReport {
    let fetches_before = controller.fetches_issued();
    let mut steps = 0;
    let mut failures = 0;
    let mut timed_out = false;

    controller.request_more();

    loop {
        if controller.state().load_in_flight() {
            if !controller.wait_for_completion(wait) {
                warn!(wait_ms = wait.as_millis() as u64, "Page fetch did not complete in time");
                timed_out = true;
                break;
            }
            if controller.state().last_error().is_some() {
                failures += 1;
            }
        }

        if controller.state().is_exhausted() || steps >= max_steps {
            break;
        }

        steps += 1;
        let content_height = controller.content_height(viewport.width);
        let bottom = (content_height - viewport.height).max(0.0);
        let issued = controller.on_scroll(ScrollMetrics::new(viewport.height, content_height, bottom));
        if !issued && !controller.state().load_in_flight() {
            break;
        }
    }

    let report = ScrollReport {
        steps,
        fetches_issued: controller.fetches_issued() - fetches_before,
        failures,
        item_count: controller.item_count(),
        content_height: controller.content_height(viewport.width),
        exhausted: controller.state().is_exhausted(),
        timed_out,
        last_error: controller.state().last_error().cloned(),
    };

    info!(
        steps = report.steps,
        fetches = report.fetches_issued,
        failures = report.failures,
        items = report.item_count,
        exhausted = report.exhausted,
        "Scroll simulation finished"
    );

    report
}
