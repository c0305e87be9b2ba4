//! Load-more trigger based on scroll position.

/// Default trigger distance, in viewport heights.
pub const DEFAULT_SCREENS_AHEAD: f64 = 2.5;

/// Scroll geometry at the moment a scroll gesture settles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Height of the visible viewport.
    pub visible_height: f64,
    /// Total height of the list content.
    pub content_height: f64,
    /// Offset the scroll will come to rest at.
    pub target_offset_y: f64,
}

impl ScrollMetrics {
    /// Create scroll metrics.
    pub fn new(visible_height: f64, content_height: f64, target_offset_y: f64) -> Self {
        Self {
            visible_height,
            content_height,
            target_offset_y,
        }
    }

    /// Content left below the viewport once the scroll settles.
    pub fn remaining_distance(&self) -> f64 {
        self.content_height - self.visible_height - self.target_offset_y
    }

    /// Remaining distance at or below which the next page is requested.
    pub fn trigger_distance(&self, screens_ahead: f64) -> f64 {
        self.visible_height * screens_ahead
    }
}

/// Decide whether the next page should be requested.
///
/// True when `remaining_distance <= visible_height * screens_ahead`.
/// Non-finite metrics never trigger.
pub fn should_load_next_page(metrics: ScrollMetrics, screens_ahead: f64) -> bool {
    metrics.remaining_distance() <= metrics.trigger_distance(screens_ahead)
}
