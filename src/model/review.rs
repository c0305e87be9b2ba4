//! Review records as delivered by the paged fetch client.

use std::fmt;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// Star rating in `MIN_RATING..=MAX_RATING`.
/// NEVER export the raw constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

/// Error returned when a rating falls outside the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between 1 and 5 (got {0})")]
pub struct InvalidRating(pub i64);

impl Rating {
    /// Smart constructor: validates the range.
    pub fn new(value: i64) -> Result<Self, InvalidRating> {
        if (i64::from(MIN_RATING)..=i64::from(MAX_RATING)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(InvalidRating(value))
        }
    }

    /// Clamp `value` into the accepted range.
    pub fn saturating(value: i64) -> Self {
        Self(value.clamp(i64::from(MIN_RATING), i64::from(MAX_RATING)) as u8)
    }

    /// Raw star count.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, MAX_RATING)
    }
}

/// A single decoded review.
///
/// Immutable once decoded; converted into a
/// [`ReviewItem`](crate::view_state::item::ReviewItem) and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    first_name: String,
    last_name: String,
    rating: Rating,
    text: String,
    created: String,
}

impl ReviewRecord {
    /// Create a record from already validated parts.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        rating: Rating,
        text: impl Into<String>,
        created: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            rating,
            text: text.into(),
            created: created.into(),
        }
    }

    /// Reviewer first name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Reviewer last name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Display name: first and last name separated by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Star rating.
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Review body. May be empty.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Creation timestamp, already formatted for display by the server.
    pub fn created(&self) -> &str {
        &self.created
    }
}

/// One page of records plus the server's total count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewPage {
    /// Records in fetch order.
    pub items: Vec<ReviewRecord>,
    /// Total number of records available on the server.
    pub count: usize,
}
