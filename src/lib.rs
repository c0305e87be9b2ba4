//! reviewfeed
//!
//! Paginated review feed: a list controller that loads pages on demand as
//! the user scrolls, and a deterministic layout engine that sizes each row.
//!
//! Pure core: `model`, `parser`, `view_state` layout and `state` transitions.
//! Impure shell: `source` worker threads, `logging`, `config` loading and the
//! binary.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;

// Headless scroll driver
pub mod integration;
