//! Rendering interfaces and the terminal preview renderer.
//!
//! Renderers never mutate list state. They read an immutable
//! [`ListAdapter`] (the controller or a snapshot), ask each
//! [`RenderableItem`] for its height, and let items fill reusable
//! [`ItemView`]s.

pub mod preview;
pub mod rating;
pub mod review_cell;
pub mod styles;

pub use preview::{buffer_to_lines, TerminalPreview};
pub use rating::{RatingConfig, RatingRenderer};
pub use review_cell::ReviewCellView;
pub use styles::{ColorConfig, Font, FontWeight, StyledRun, TextRole};

use crate::view_state::TextMeasurer;
use std::any::Any;

/// An item a list renderer can size and display.
///
/// The variant set is open: new item kinds implement this trait and pair
/// with their own [`ItemView`] type.
pub trait RenderableItem: Send + Sync {
    /// Identifier of the view type this item fills.
    fn reuse_id(&self) -> &'static str;

    /// Fill `view` with this item's content.
    ///
    /// Views of another type are left untouched.
    fn update(&self, view: &mut dyn ItemView);

    /// Row height at the given container width.
    fn height(&self, width: f64, measurer: &dyn TextMeasurer) -> f64;
}

/// A reusable view that items can be applied to.
pub trait ItemView: Any {
    /// Identifier matching [`RenderableItem::reuse_id`].
    fn reuse_id(&self) -> &'static str;

    /// Downcast hook used by items for the capability check in `update`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Read-only list interface exposed to renderers.
pub trait ListAdapter {
    /// Number of rows.
    fn item_count(&self) -> usize;

    /// Item at `index`, if in range.
    fn item_at(&self, index: usize) -> Option<&dyn RenderableItem>;

    /// Measurer the rows are laid out with.
    ///
    /// Renderers that break text into lines must use this one so the lines
    /// agree with the cached row frames.
    fn measurer(&self) -> &dyn TextMeasurer;

    /// Row height at `index` for the given width, if in range.
    fn height_at(&self, index: usize, width: f64) -> Option<f64> {
        self.item_at(index)
            .map(|item| item.height(width, self.measurer()))
    }

    /// Sum of all row heights at `width`.
    fn content_height(&self, width: f64) -> f64 {
        (0..self.item_count())
            .filter_map(|index| self.height_at(index, width))
            .sum()
    }
}
