//! Tests for the review list controller.
//!
//! Most tests drive a manual fetcher that parks callbacks until the test
//! resolves them, so request/response interleavings are fully controlled.

use super::*;
use crate::model::{DecodeError, TransportError};
use crate::source::{synthetic_records, FetchCallback, LocalReviewSource};
use crate::view_state::MonospaceMeasurer;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Mutex;

type Pending = Arc<Mutex<Vec<(PageRequest, FetchCallback)>>>;

/// Fetcher that records requests and completes them on demand.
#[derive(Clone, Default)]
struct ManualFetcher {
    pending: Pending,
}

impl ManualFetcher {
    fn pending_count(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    fn pending_requests(&self) -> Vec<PageRequest> {
        self.pending.lock().unwrap().iter().map(|(r, _)| *r).collect()
    }

    /// Resolve the oldest pending fetch with a page of a `total`-record set.
    fn serve_next(&self, total: usize) -> PageRequest {
        let (request, callback) = self.pending.lock().unwrap().remove(0);
        callback(payload(total, request));
        request
    }

    fn fail_next(&self, result: FetchResult) -> PageRequest {
        let (request, callback) = self.pending.lock().unwrap().remove(0);
        callback(result);
        request
    }
}

impl PageFetcher for ManualFetcher {
    fn fetch(&self, request: PageRequest, on_complete: FetchCallback) {
        self.pending.lock().unwrap().push((request, on_complete));
    }
}

fn payload(total: usize, request: PageRequest) -> FetchResult {
    LocalReviewSource::new(synthetic_records(total)).page_payload(request)
}

fn measurer() -> Arc<dyn TextMeasurer> {
    Arc::new(MonospaceMeasurer::default())
}

fn controller(fetcher: &ManualFetcher) -> ReviewsController<ManualFetcher> {
    ReviewsController::new(fetcher.clone(), measurer(), ListSettings::default())
}

fn offline() -> FetchResult {
    Err(TransportError::Unavailable {
        reason: "offline".to_string(),
    })
}

type Notifications = Rc<RefCell<Vec<(usize, LoadPhase)>>>;

fn record_notifications(controller: &mut ReviewsController<ManualFetcher>) -> Notifications {
    let seen: Notifications = Rc::default();
    let sink = Rc::clone(&seen);
    controller.set_observer(move |snapshot: &ListSnapshot| {
        sink.borrow_mut().push((snapshot.count(), snapshot.phase()));
    });
    seen
}

// ===== Request gating =====

#[test]
fn new_controller_issues_no_fetch() {
    let fetcher = ManualFetcher::default();
    let controller = controller(&fetcher);

    assert_eq!(fetcher.pending_count(), 0);
    assert_eq!(controller.state().phase(), LoadPhase::Idle);
    assert_eq!(controller.item_count(), 0);
}

#[test]
fn request_more_is_idempotent_while_loading() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);

    assert!(controller.request_more());
    assert!(!controller.request_more());
    assert!(!controller.request_more());

    assert_eq!(fetcher.pending_requests(), vec![PageRequest::new(0, 20)]);
    assert_eq!(controller.fetches_issued(), 1);
}

#[test]
fn nothing_is_applied_until_processed() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);

    controller.request_more();
    fetcher.serve_next(45);

    assert_eq!(controller.item_count(), 0, "completion is queued, not applied");
    assert_eq!(controller.process_completions(), 1);
    assert_eq!(controller.item_count(), 20);
}

// ===== Paging =====

#[test]
fn forty_five_records_load_in_three_pages() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);

    let mut offsets = Vec::new();
    for (expected_count, expected_offset) in [(20, 20), (40, 40), (45, 60)] {
        assert!(controller.request_more());
        offsets.push(fetcher.serve_next(45).offset);
        assert_eq!(controller.process_completions(), 1);
        assert_eq!(controller.item_count(), expected_count);
        assert_eq!(controller.state().offset(), expected_offset);
    }

    assert_eq!(offsets, vec![0, 20, 40]);
    assert!(controller.state().is_exhausted());
    assert_eq!(controller.state().total_count(), Some(45));

    assert!(!controller.request_more(), "exhausted list must not fetch");
    assert_eq!(fetcher.pending_count(), 0);
    assert_eq!(controller.fetches_issued(), 3);
}

#[test]
fn items_keep_fetch_order() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);
    let expected = synthetic_records(30);

    for _ in 0..2 {
        controller.request_more();
        fetcher.serve_next(30);
        controller.process_completions();
    }

    let names: Vec<&str> = (0..controller.item_count())
        .map(|i| controller.item(i).unwrap().username().text())
        .collect();
    let expected_names: Vec<String> = expected.iter().map(|r| r.full_name()).collect();
    assert_eq!(names, expected_names);
}

#[test]
fn empty_server_exhausts_after_one_fetch() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);

    controller.request_more();
    fetcher.serve_next(0);
    controller.process_completions();

    assert!(controller.state().is_exhausted());
    assert_eq!(controller.item_count(), 0);
    assert!(!controller.request_more());
}

#[test]
fn body_line_limit_comes_from_settings() {
    let fetcher = ManualFetcher::default();
    let settings = ListSettings {
        max_body_lines: 7,
        ..ListSettings::default()
    };
    let mut controller = ReviewsController::new(fetcher.clone(), measurer(), settings);

    controller.request_more();
    fetcher.serve_next(3);
    controller.process_completions();

    assert_eq!(controller.item(0).unwrap().max_lines(), 7);
}

// ===== Failures =====

#[test]
fn transport_failure_keeps_state_and_rearms() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);

    controller.request_more();
    fetcher.serve_next(45);
    controller.process_completions();

    controller.request_more();
    fetcher.fail_next(offline());
    assert_eq!(controller.process_completions(), 1);

    assert_eq!(controller.item_count(), 20);
    assert_eq!(controller.state().offset(), 20);
    assert_eq!(controller.state().phase(), LoadPhase::Idle);
    assert!(matches!(
        controller.state().last_error(),
        Some(FetchError::Transport(TransportError::Unavailable { .. }))
    ));

    assert!(controller.request_more(), "failure must re-arm loading");
    assert_eq!(fetcher.pending_requests(), vec![PageRequest::new(20, 20)]);
}

#[test]
fn malformed_payload_is_a_decode_failure() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);

    controller.request_more();
    fetcher.fail_next(Ok(b"<html>bad gateway</html>".to_vec()));
    controller.process_completions();

    assert!(matches!(
        controller.state().last_error(),
        Some(FetchError::Decode(DecodeError::InvalidJson { .. }))
    ));
    assert_eq!(controller.state().offset(), 0);
    assert!(controller.request_more());
}

#[test]
fn retry_after_failure_clears_error() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);

    controller.request_more();
    fetcher.fail_next(offline());
    controller.process_completions();
    controller.request_more();
    fetcher.serve_next(45);
    controller.process_completions();

    assert!(controller.state().last_error().is_none());
    assert_eq!(controller.item_count(), 20);
}

// ===== Reset and stale completions =====

#[test]
fn completion_after_reset_is_discarded() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);

    controller.request_more();
    controller.reset();
    fetcher.serve_next(45);

    assert_eq!(controller.process_completions(), 0);
    assert_eq!(controller.item_count(), 0);
    assert_eq!(controller.state().phase(), LoadPhase::Idle);
    assert_eq!(controller.state().generation(), 1);
}

#[test]
fn reset_allows_loading_again_from_zero() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);

    controller.request_more();
    fetcher.serve_next(5);
    controller.process_completions();
    assert!(controller.state().is_exhausted());

    controller.reset();
    assert!(controller.request_more());
    assert_eq!(fetcher.pending_requests(), vec![PageRequest::new(0, 20)]);
}

#[test]
fn fresh_page_wins_over_stale_one_after_reset() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);

    controller.request_more();
    controller.reset();
    controller.request_more();

    // Old generation resolves first, then the new one.
    fetcher.serve_next(45);
    fetcher.serve_next(45);

    assert_eq!(controller.process_completions(), 1);
    assert_eq!(controller.item_count(), 20);
    assert_eq!(controller.state().offset(), 20);
}

// ===== Observer =====

#[test]
fn observer_notified_once_per_resolution() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);
    let seen = record_notifications(&mut controller);

    controller.request_more();
    assert!(seen.borrow().is_empty(), "issuing a fetch does not notify");

    fetcher.serve_next(45);
    controller.process_completions();
    controller.request_more();
    fetcher.fail_next(offline());
    controller.process_completions();

    assert_eq!(
        *seen.borrow(),
        vec![(20, LoadPhase::Idle), (20, LoadPhase::Idle)]
    );
}

#[test]
fn observer_sees_exhaustion_and_reset() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);
    let seen = record_notifications(&mut controller);

    controller.request_more();
    fetcher.serve_next(3);
    controller.process_completions();
    controller.reset();

    assert_eq!(
        *seen.borrow(),
        vec![(3, LoadPhase::Exhausted), (0, LoadPhase::Idle)]
    );
}

#[test]
fn stale_completion_does_not_notify() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);

    controller.request_more();
    controller.reset();
    let seen = record_notifications(&mut controller);
    fetcher.serve_next(45);
    controller.process_completions();

    assert!(seen.borrow().is_empty());
}

#[test]
fn cleared_observer_is_not_called() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);
    let seen = record_notifications(&mut controller);
    controller.clear_observer();

    controller.request_more();
    fetcher.serve_next(45);
    controller.process_completions();

    assert!(seen.borrow().is_empty());
}

// ===== Scroll trigger =====

#[test]
fn scroll_far_from_end_does_not_fetch() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);

    assert!(!controller.on_scroll(ScrollMetrics::new(600.0, 10_000.0, 0.0)));
    assert_eq!(fetcher.pending_count(), 0);
}

#[test]
fn scroll_near_end_fetches_once() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);
    let near_end = ScrollMetrics::new(600.0, 2000.0, 500.0);

    assert!(controller.on_scroll(near_end));
    assert!(!controller.on_scroll(near_end));
    assert_eq!(fetcher.pending_count(), 1);
}

#[test]
fn explicit_threshold_overrides_settings() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);
    // remaining = 2000 - 600 - 500 = 900
    let metrics = ScrollMetrics::new(600.0, 2000.0, 500.0);

    assert!(!controller.on_scroll_with_threshold(metrics, 1.0));
    assert!(controller.on_scroll_with_threshold(metrics, 1.5));
}

// ===== Threaded delivery =====

#[test]
fn worker_thread_completion_is_applied_by_wait() {
    let source = LocalReviewSource::new(synthetic_records(25));
    let mut controller = ReviewsController::new(source, measurer(), ListSettings::default());

    assert!(controller.request_more());
    assert!(controller.wait_for_completion(Duration::from_secs(5)));
    assert_eq!(controller.item_count(), 20);
    assert_eq!(controller.fetcher().request_count(), 1);
}

#[test]
fn unbounded_wait_blocks_until_completion() {
    let source =
        LocalReviewSource::new(synthetic_records(25)).with_latency(Duration::from_millis(20));
    let mut controller = ReviewsController::new(source, measurer(), ListSettings::default());

    assert!(controller.request_more());
    assert!(controller.wait_for_completion(Duration::MAX));
    assert_eq!(controller.item_count(), 20);
    assert!(!controller.state().load_in_flight());
}

#[test]
fn wait_without_fetch_times_out() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);
    assert!(!controller.wait_for_completion(Duration::from_millis(10)));
}

// ===== Adapter =====

#[test]
fn content_height_sums_item_heights() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);
    controller.request_more();
    fetcher.serve_next(8);
    controller.process_completions();

    let width = 375.0;
    let expected: f64 = (0..controller.item_count())
        .map(|i| controller.height_at(i, width).unwrap())
        .sum();

    assert!(expected > 0.0);
    assert_eq!(controller.content_height(width), expected);
    assert_eq!(controller.snapshot().content_height(width), expected);
    assert_eq!(controller.height_at(8, width), None);
}

#[test]
fn adapter_items_report_review_reuse_id() {
    let fetcher = ManualFetcher::default();
    let mut controller = controller(&fetcher);
    controller.request_more();
    fetcher.serve_next(2);
    controller.process_completions();

    let item = controller.item_at(1).unwrap();
    assert_eq!(item.reuse_id(), ReviewItem::REUSE_ID);
    assert!(controller.item_at(2).is_none());
}
