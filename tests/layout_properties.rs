//! Property-based tests for row layout.
//!
//! Tests validate:
//! 1. Frames stack top to bottom with the fixed spacings
//! 2. Row height is the timestamp bottom plus the bottom inset
//! 3. Body height never exceeds the line cap
//! 4. Layout is deterministic and the cache returns the computed value
//! 5. Degenerate widths clamp instead of failing

use proptest::prelude::*;
use reviewfeed::model::{Rating, Rect};
use reviewfeed::view::{StyledRun, TextRole};
use reviewfeed::view_state::layout::{
    AVATAR_SIZE, INSETS, RATING_SIZE, RATING_TO_TEXT_SPACING, TEXT_TO_CREATED_SPACING,
    USERNAME_TO_RATING_SPACING,
};
use reviewfeed::view_state::{compute_layout, MonospaceMeasurer, ReviewItem};

fn item(name: &str, body: &str, created: &str, stars: i64, max_lines: usize) -> ReviewItem {
    ReviewItem::new(
        StyledRun::styled(name, TextRole::Name),
        StyledRun::styled(body, TextRole::Body),
        Rating::saturating(stars),
        StyledRun::styled(created, TextRole::Timestamp),
        max_lines,
    )
}

fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{1,12}( [a-z]{1,12}){0,40}",
        "[a-zA-Zа-яё ]{0,200}",
        "[a-z ]{0,60}\n[a-z ]{0,60}",
    ]
}

proptest! {
    #[test]
    fn frames_stack_with_fixed_spacing(
        name in "[A-Za-z]{1,20} [A-Za-z]{1,20}",
        body in text_strategy(),
        created in "[0-9]{1,2} [A-Za-z]{3,9} 20[0-9]{2}",
        stars in 1i64..=5,
        max_lines in 1usize..6,
        width in 0.0f64..1200.0,
    ) {
        let measurer = MonospaceMeasurer::default();
        let item = item(&name, &body, &created, stars, max_lines);
        let layout = compute_layout(&item, width, &measurer);

        prop_assert_eq!(layout.avatar, Rect::new(INSETS.left, INSETS.top, AVATAR_SIZE.width, AVATAR_SIZE.height));
        prop_assert_eq!(layout.username.min_y(), INSETS.top);
        prop_assert_eq!(layout.rating.min_y(), layout.username.max_y() + USERNAME_TO_RATING_SPACING);
        prop_assert_eq!(layout.rating.size(), RATING_SIZE);

        let top = layout.top_section_height();
        prop_assert!(top >= INSETS.top + AVATAR_SIZE.height);

        if body.trim().is_empty() || width <= INSETS.horizontal() {
            prop_assert_eq!(layout.created.min_y() >= top + RATING_TO_TEXT_SPACING, true);
        } else {
            prop_assert_eq!(layout.review_text.min_y(), top + RATING_TO_TEXT_SPACING);
            prop_assert_eq!(
                layout.created.min_y(),
                layout.review_text.max_y() + TEXT_TO_CREATED_SPACING
            );
        }

        prop_assert_eq!(layout.height, layout.created.max_y() + INSETS.bottom);
        prop_assert!(layout.height >= INSETS.top + AVATAR_SIZE.height + RATING_TO_TEXT_SPACING + INSETS.bottom);

        for frame in [layout.username, layout.review_text, layout.created] {
            prop_assert!(frame.width >= 0.0 && frame.height >= 0.0);
        }
    }

    #[test]
    fn body_respects_line_cap(
        body in "[a-z]{1,10}( [a-z]{1,10}){20,80}",
        max_lines in 1usize..6,
        width in 120.0f64..800.0,
    ) {
        let measurer = MonospaceMeasurer::default();
        let item = item("Jane Doe", &body, "today", 4, max_lines);
        let layout = compute_layout(&item, width, &measurer);

        let line_height = measurer.line_height(TextRole::Body.font());
        prop_assert!(layout.review_text.height <= max_lines as f64 * line_height);
        prop_assert!(layout.review_text.height >= line_height);
    }

    #[test]
    fn layout_is_deterministic_and_cached(
        body in text_strategy(),
        width in 0.0f64..1200.0,
    ) {
        let measurer = MonospaceMeasurer::default();
        let item = item("Ivan Petrov", &body, "1 March 2024", 3, 3);

        let first = compute_layout(&item, width, &measurer);
        let second = compute_layout(&item, width, &measurer);
        let cached = item.layout(width, &measurer);
        let cached_again = item.layout(width, &measurer);

        prop_assert!(first.bit_eq(&second));
        prop_assert!(first.bit_eq(&cached));
        prop_assert!(cached.bit_eq(&cached_again));
        prop_assert_eq!(item.cached_layout_width(), Some(width));
        prop_assert_eq!(item.height(width, &measurer), first.height);
    }

    #[test]
    fn empty_body_collapses_body_frame(
        width in 0.0f64..1200.0,
        max_lines in 1usize..6,
    ) {
        let measurer = MonospaceMeasurer::default();
        let item = item("Anna Smirnova", "", "2 May 2024", 5, max_lines);
        let layout = compute_layout(&item, width, &measurer);

        prop_assert_eq!(layout.review_text, Rect::ZERO);
        prop_assert_eq!(layout.created.min_y(), layout.top_section_height() + RATING_TO_TEXT_SPACING);
    }

    #[test]
    fn narrow_widths_clamp(width in -500.0f64..=32.0) {
        let measurer = MonospaceMeasurer::default();
        let item = item("Oleg Sokolov", "Some words here", "today", 2, 3);
        let layout = compute_layout(&item, width, &measurer);

        prop_assert_eq!(layout.username.width, 0.0);
        prop_assert_eq!(layout.created.width, 0.0);
        prop_assert!(layout.height.is_finite());
    }
}
