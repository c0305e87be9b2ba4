//! View displaying a single review row.

use super::rating::RatingRenderer;
use super::styles::StyledRun;
use super::{ItemView, RenderableItem};
use crate::model::Rect;
use crate::view_state::{ReviewItem, TextMeasurer};
use std::any::Any;

/// Concrete view for [`ReviewItem`]s.
///
/// Filled by [`RenderableItem::update`]; frames are applied by
/// [`ReviewCellView::layout_subviews`] from the item's cached layout.
#[derive(Debug, Clone, Default)]
pub struct ReviewCellView {
    config: Option<ReviewItem>,
    username: Option<StyledRun>,
    rating_glyphs: String,
    review_text: Option<StyledRun>,
    review_text_max_lines: usize,
    created: Option<StyledRun>,
    avatar_frame: Rect,
    username_frame: Rect,
    rating_frame: Rect,
    review_text_frame: Rect,
    created_frame: Rect,
}

impl ReviewCellView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy content from `item`. Frames are left for `layout_subviews`.
    pub fn configure(&mut self, item: &ReviewItem) {
        self.username = Some(item.username().clone());
        self.rating_glyphs = RatingRenderer::shared().glyphs(item.rating()).to_string();
        self.review_text = Some(item.review_text().clone());
        self.review_text_max_lines = item.max_lines();
        self.created = Some(item.created().clone());
        self.config = Some(item.clone());
    }

    /// Apply the configured item's layout at `width`. No-op when unconfigured.
    pub fn layout_subviews(&mut self, width: f64, measurer: &dyn TextMeasurer) {
        let Some(config) = &self.config else {
            return;
        };
        let layout = config.layout(width, measurer);
        self.avatar_frame = layout.avatar;
        self.username_frame = layout.username;
        self.rating_frame = layout.rating;
        self.review_text_frame = layout.review_text;
        self.created_frame = layout.created;
    }

    /// True once an item has been applied.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Reviewer name run.
    pub fn username(&self) -> Option<&StyledRun> {
        self.username.as_ref()
    }

    /// Star strip for the rating.
    pub fn rating_glyphs(&self) -> &str {
        &self.rating_glyphs
    }

    /// Body run.
    pub fn review_text(&self) -> Option<&StyledRun> {
        self.review_text.as_ref()
    }

    /// Line cap applied to the body.
    pub fn review_text_max_lines(&self) -> usize {
        self.review_text_max_lines
    }

    /// Timestamp run.
    pub fn created(&self) -> Option<&StyledRun> {
        self.created.as_ref()
    }

    /// Avatar frame.
    pub fn avatar_frame(&self) -> Rect {
        self.avatar_frame
    }

    /// Name frame.
    pub fn username_frame(&self) -> Rect {
        self.username_frame
    }

    /// Rating frame.
    pub fn rating_frame(&self) -> Rect {
        self.rating_frame
    }

    /// Body frame; `Rect::ZERO` when the body is empty.
    pub fn review_text_frame(&self) -> Rect {
        self.review_text_frame
    }

    /// Timestamp frame.
    pub fn created_frame(&self) -> Rect {
        self.created_frame
    }
}

impl ItemView for ReviewCellView {
    fn reuse_id(&self) -> &'static str {
        ReviewItem::REUSE_ID
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl RenderableItem for ReviewItem {
    fn reuse_id(&self) -> &'static str {
        Self::REUSE_ID
    }

    fn update(&self, view: &mut dyn ItemView) {
        if let Some(cell) = view.as_any_mut().downcast_mut::<ReviewCellView>() {
            cell.configure(self);
        }
    }

    fn height(&self, width: f64, measurer: &dyn TextMeasurer) -> f64 {
        ReviewItem::height(self, width, measurer)
    }
}
