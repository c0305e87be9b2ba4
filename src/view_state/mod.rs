//! View-state layer - items, measurement and row layout
//!
//! This module turns decoded records into rendering-ready items and computes
//! their geometry for a given container width.
//!
//! # Module Structure
//!
//! - `item`: ReviewItem - styled review content with an inline layout cache
//! - `cache`: LayoutCache - single-slot cache keyed by container width
//! - `layout`: ReviewLayout + compute_layout - the row geometry algorithm
//! - `measure`: TextMeasurer trait and the monospace reference measurer

pub mod cache;
pub mod item;
pub mod layout;
pub mod measure;

pub use item::ReviewItem;
pub use layout::{compute_layout, ReviewLayout};
pub use measure::{MonospaceMeasurer, TextMeasurer};
