//! JSON codec for review page payloads.
//!
//! This module provides pure functions for converting the wire payload
//! into validated [`ReviewPage`] values and back.
//!
//! Payload shape:
//!
//! ```json
//! { "items": [ { "first_name": "Jane", "last_name": "Doe", "rating": 5,
//!                "text": "Great", "created": "13 March 2024" } ],
//!   "count": 45 }
//! ```

use crate::model::{DecodeError, Rating, ReviewPage, ReviewRecord};
use serde::{Deserialize, Serialize};

/// Raw JSON structure for a single review.
#[derive(Debug, Deserialize, Serialize)]
struct RawReview {
    first_name: String,
    last_name: String,
    rating: i64,
    text: String,
    created: String,
}

/// Raw JSON structure for a page.
#[derive(Debug, Deserialize, Serialize)]
struct RawPage {
    items: Vec<RawReview>,
    count: usize,
}

/// Either a bare list of reviews or a full page object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDataSet {
    Page(RawPage),
    List(Vec<RawReview>),
}

/// Decode a page payload.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidJson`] for malformed JSON or missing/mistyped
/// fields, and [`DecodeError::InvalidRating`] for ratings outside `1..=5`.
pub fn decode_page(payload: &[u8]) -> Result<ReviewPage, DecodeError> {
    let raw: RawPage = serde_json::from_slice(payload).map_err(invalid_json)?;
    Ok(ReviewPage {
        items: convert_reviews(raw.items)?,
        count: raw.count,
    })
}

/// Decode a local data set: a bare JSON array of reviews or a page object.
///
/// For a page object the embedded `count` is ignored; the number of records
/// is the data set size.
///
/// # Errors
///
/// Same as [`decode_page`].
pub fn decode_records(payload: &[u8]) -> Result<Vec<ReviewRecord>, DecodeError> {
    let raw: RawDataSet = serde_json::from_slice(payload).map_err(invalid_json)?;
    let reviews = match raw {
        RawDataSet::Page(page) => page.items,
        RawDataSet::List(list) => list,
    };
    convert_reviews(reviews)
}

/// Encode records as a page payload with the given total count.
///
/// # Errors
///
/// Returns the serializer error, which only occurs on writer failures.
pub fn encode_page(records: &[ReviewRecord], count: usize) -> Result<Vec<u8>, serde_json::Error> {
    let raw = RawPage {
        items: records
            .iter()
            .map(|record| RawReview {
                first_name: record.first_name().to_string(),
                last_name: record.last_name().to_string(),
                rating: i64::from(record.rating().get()),
                text: record.text().to_string(),
                created: record.created().to_string(),
            })
            .collect(),
        count,
    };
    serde_json::to_vec(&raw)
}

fn convert_reviews(raw: Vec<RawReview>) -> Result<Vec<ReviewRecord>, DecodeError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, review)| {
            let rating = Rating::new(review.rating).map_err(|err| DecodeError::InvalidRating {
                index,
                value: err.0,
            })?;
            Ok(ReviewRecord::new(
                review.first_name,
                review.last_name,
                rating,
                review.text,
                review.created,
            ))
        })
        .collect()
}

fn invalid_json(err: serde_json::Error) -> DecodeError {
    DecodeError::InvalidJson {
        reason: err.to_string(),
    }
}
