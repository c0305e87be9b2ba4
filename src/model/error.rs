//! Error types for reviewfeed.
//!
//! This module defines the error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the binary, wrapping every domain failure
//!   - [`InputError`] - Loading a local review data set failed
//!   - [`ConfigError`](crate::config::ConfigError) - Config file could not be read or is invalid
//!   - [`LoggingError`](crate::logging::LoggingError) - Tracing setup failed
//! - [`FetchError`] - A single page load failed
//!   - [`TransportError`] - The fetch itself failed
//!   - [`DecodeError`] - The payload was malformed
//!
//! # Recovery Strategy
//!
//! Page load failures are **non-fatal**: the list controller records the error,
//! leaves items and offset untouched and re-arms loading so the same page can be
//! requested again. Input, config and logging errors are fatal and propagate to
//! `main`.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load the local review data set.
    #[error("Failed to read input: {0}")]
    Input(#[from] InputError),

    /// Configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when loading a local review data set.
#[derive(Debug, Error)]
pub enum InputError {
    /// The data file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use reviewfeed::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json"),
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The data file exists but its contents are not a review list.
    #[error("Invalid review data in {path}: {source}")]
    InvalidData {
        /// File that failed to decode.
        path: PathBuf,
        /// Underlying decode failure.
        #[source]
        source: DecodeError,
    },

    /// Generic I/O failure while reading the data file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single page load.
///
/// Both variants are collapsed by the list controller into one "page load failed"
/// outcome; the distinction is kept for logging and for renderers that surface
/// the last error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The fetch client could not deliver a payload.
    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A payload was delivered but could not be decoded.
    #[error("Decode failure: {0}")]
    Decode(#[from] DecodeError),
}

/// Failure reported by a [`PageFetcher`](crate::source::PageFetcher).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The backing service is unavailable.
    #[error("Service unavailable: {reason}")]
    Unavailable {
        /// Human readable cause.
        reason: String,
    },

    /// A failure injected by a test or demo source.
    #[error("Injected failure for request #{request}")]
    Injected {
        /// 1-based sequence number of the failing request.
        request: usize,
    },

    /// The completion channel was closed before the fetch resolved.
    #[error("Completion channel disconnected")]
    Disconnected,
}

/// Failure decoding a page payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Payload is not valid JSON or is missing/mistyping a field.
    #[error("Invalid JSON payload: {reason}")]
    InvalidJson {
        /// serde_json error description.
        reason: String,
    },

    /// A record carries a rating outside the accepted range.
    #[error("Invalid rating {value} in record {index}")]
    InvalidRating {
        /// Position of the record within the page.
        index: usize,
        /// Rejected rating value.
        value: i64,
    },
}
