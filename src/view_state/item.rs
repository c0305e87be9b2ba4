//! Rendering-ready review items.

use super::cache::LayoutCache;
use super::layout::{compute_layout, ReviewLayout};
use super::measure::TextMeasurer;
use crate::model::{Rating, ReviewRecord};
use crate::view::styles::{StyledRun, TextRole};

/// A review converted for display.
///
/// Immutable once constructed. Carries an inline [`LayoutCache`] so repeated
/// height queries at the same width are served without re-measuring.
#[derive(Debug, Clone)]
pub struct ReviewItem {
    username: StyledRun,
    review_text: StyledRun,
    rating: Rating,
    created: StyledRun,
    max_lines: usize,
    layout: LayoutCache,
}

impl ReviewItem {
    /// Reuse identifier for views displaying review items.
    pub const REUSE_ID: &'static str = "ReviewItem";

    /// Default cap on visible body lines.
    pub const DEFAULT_MAX_LINES: usize = 3;

    /// Create an item from styled parts.
    pub fn new(
        username: StyledRun,
        review_text: StyledRun,
        rating: Rating,
        created: StyledRun,
        max_lines: usize,
    ) -> Self {
        Self {
            username,
            review_text,
            rating,
            created,
            max_lines,
            layout: LayoutCache::new(),
        }
    }

    /// Style a decoded record.
    ///
    /// The name run is `"{first} {last}"`.
    pub fn from_record(record: &ReviewRecord, max_lines: usize) -> Self {
        Self::new(
            StyledRun::styled(record.full_name(), TextRole::Name),
            StyledRun::styled(record.text(), TextRole::Body),
            record.rating(),
            StyledRun::styled(record.created(), TextRole::Timestamp),
            max_lines,
        )
    }

    /// Styled reviewer name.
    pub fn username(&self) -> &StyledRun {
        &self.username
    }

    /// Styled review body.
    pub fn review_text(&self) -> &StyledRun {
        &self.review_text
    }

    /// Star rating.
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Styled creation timestamp.
    pub fn created(&self) -> &StyledRun {
        &self.created
    }

    /// Maximum number of visible body lines.
    pub fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Layout at `width`, served from the cache when neither the width nor
    /// the measurer changed since the last query.
    ///
    /// Measurers are told apart by address, so a list should measure all of
    /// its items through one long-lived measurer.
    pub fn layout(&self, width: f64, measurer: &dyn TextMeasurer) -> ReviewLayout {
        self.layout
            .get_or_compute(width, measurer_id(measurer), || {
                compute_layout(self, width, measurer)
            })
    }

    /// Row height at `width`.
    pub fn height(&self, width: f64, measurer: &dyn TextMeasurer) -> f64 {
        self.layout(width, measurer).height
    }

    /// Width the cached layout was computed for.
    pub fn cached_layout_width(&self) -> Option<f64> {
        self.layout.cached_width()
    }
}

fn measurer_id(measurer: &dyn TextMeasurer) -> usize {
    std::ptr::from_ref(measurer).cast::<()>() as usize
}
