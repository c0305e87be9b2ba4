//! Row layout for review items.

use super::item::ReviewItem;
use super::measure::TextMeasurer;
use crate::model::{EdgeInsets, Rect, Size};

/// Avatar square.
pub const AVATAR_SIZE: Size = Size::new(36.0, 36.0);
/// Avatar corner radius (renders as a circle).
pub const AVATAR_CORNER_RADIUS: f64 = 18.0;
/// Rating glyph box.
pub const RATING_SIZE: Size = Size::new(84.0, 16.0);
/// Row content insets.
pub const INSETS: EdgeInsets = EdgeInsets::uniform(16.0);
/// Horizontal gap between avatar and name/rating column.
pub const AVATAR_TO_TEXT_SPACING: f64 = 12.0;
/// Vertical gap between name and rating.
pub const USERNAME_TO_RATING_SPACING: f64 = 4.0;
/// Vertical gap between the top section and the body.
pub const RATING_TO_TEXT_SPACING: f64 = 8.0;
/// Vertical gap between body and timestamp.
pub const TEXT_TO_CREATED_SPACING: f64 = 8.0;

/// Single-line cap used for name and timestamp runs.
const SINGLE_LINE: Option<usize> = Some(1);

/// Frames of every element of a review row plus the total row height.
///
/// Computed from item content + container width. Stored in the item's
/// layout cache.
///
/// # Invariants
/// - `body == Rect::ZERO` when the item has no body text
/// - `height == created.max_y() + INSETS.bottom`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReviewLayout {
    /// Avatar frame.
    pub avatar: Rect,
    /// Reviewer name frame.
    pub username: Rect,
    /// Rating glyph frame.
    pub rating: Rect,
    /// Review body frame.
    pub review_text: Rect,
    /// Timestamp frame.
    pub created: Rect,
    /// Total row height.
    pub height: f64,
}

impl ReviewLayout {
    /// Bottom edge of the avatar/name/rating block.
    pub fn top_section_height(&self) -> f64 {
        self.avatar.max_y().max(self.rating.max_y())
    }

    /// Bit-level equality of every frame and the height.
    pub fn bit_eq(&self, other: &ReviewLayout) -> bool {
        self.avatar.bit_eq(&other.avatar)
            && self.username.bit_eq(&other.username)
            && self.rating.bit_eq(&other.rating)
            && self.review_text.bit_eq(&other.review_text)
            && self.created.bit_eq(&other.created)
            && self.height.to_bits() == other.height.to_bits()
    }
}

/// Compute the layout of `item` inside a container `max_width` points wide.
///
/// This is THE canonical implementation. Cached access goes through
/// [`ReviewItem::layout`].
///
/// # Contract
/// - MUST be deterministic (same inputs → bit-identical output)
/// - MUST NOT fail: widths narrower than the insets clamp to zero
pub fn compute_layout(item: &ReviewItem, max_width: f64, measurer: &dyn TextMeasurer) -> ReviewLayout {
    let content_width = (max_width - INSETS.horizontal()).max(0.0);

    let avatar = Rect::from_origin_size(INSETS.left, INSETS.top, AVATAR_SIZE);

    let username_width = (content_width - AVATAR_SIZE.width - AVATAR_TO_TEXT_SPACING).max(0.0);
    let username_size = measurer.measure(item.username(), username_width, SINGLE_LINE);
    let username = Rect::new(
        avatar.max_x() + AVATAR_TO_TEXT_SPACING,
        avatar.min_y(),
        username_width,
        username_size.height,
    );

    let rating = Rect::from_origin_size(
        username.min_x(),
        username.max_y() + USERNAME_TO_RATING_SPACING,
        RATING_SIZE,
    );

    let top_section_height = avatar.max_y().max(rating.max_y());
    let mut current_y = top_section_height + RATING_TO_TEXT_SPACING;

    let review_text = if item.review_text().is_empty() {
        Rect::ZERO
    } else {
        let text_size = measurer.measure(item.review_text(), content_width, Some(item.max_lines()));
        let frame = Rect::new(INSETS.left, current_y, content_width, text_size.height);
        current_y = frame.max_y() + TEXT_TO_CREATED_SPACING;
        frame
    };

    let created_size = measurer.measure(item.created(), content_width, SINGLE_LINE);
    let created = Rect::new(INSETS.left, current_y, content_width, created_size.height);

    ReviewLayout {
        avatar,
        username,
        rating,
        review_text,
        created,
        height: created.max_y() + INSETS.bottom,
    }
}
