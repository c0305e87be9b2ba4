//! Rating glyph rendering.

use crate::model::{Rating, MAX_RATING};
use std::sync::OnceLock;

/// Glyph configuration for rating strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingConfig {
    /// Total number of stars drawn.
    pub star_count: u8,
    /// Glyph for a filled star.
    pub filled: char,
    /// Glyph for an empty star.
    pub empty: char,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            star_count: MAX_RATING,
            filled: '★',
            empty: '☆',
        }
    }
}

/// Renders a rating as a strip of star glyphs.
///
/// Every strip is built once at construction; lookups never allocate.
#[derive(Debug, Clone)]
pub struct RatingRenderer {
    strips: Vec<String>,
}

impl RatingRenderer {
    /// Build a renderer for the given glyph configuration.
    pub fn new(config: RatingConfig) -> Self {
        let strips = (0..=config.star_count)
            .map(|filled| {
                (0..config.star_count)
                    .map(|i| if i < filled { config.filled } else { config.empty })
                    .collect()
            })
            .collect();
        Self { strips }
    }

    /// Process-wide renderer with the default configuration.
    pub fn shared() -> &'static RatingRenderer {
        static SHARED: OnceLock<RatingRenderer> = OnceLock::new();
        SHARED.get_or_init(|| RatingRenderer::new(RatingConfig::default()))
    }

    /// Star strip for `rating`. Ratings above the star count render full.
    pub fn glyphs(&self, rating: Rating) -> &str {
        let index = usize::from(rating.get()).min(self.strips.len().saturating_sub(1));
        self.strips.get(index).map(String::as_str).unwrap_or_default()
    }
}

impl Default for RatingRenderer {
    fn default() -> Self {
        Self::new(RatingConfig::default())
    }
}
