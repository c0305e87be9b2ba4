//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod geometry;
pub mod review;

// Re-export for convenience
pub use error::{AppError, DecodeError, FetchError, InputError, TransportError};
pub use geometry::{EdgeInsets, Rect, Size};
pub use review::{InvalidRating, Rating, ReviewPage, ReviewRecord, MAX_RATING, MIN_RATING};
