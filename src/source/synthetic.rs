//! Deterministic sample reviews.

use crate::model::{Rating, ReviewRecord};

const FIRST_NAMES: &[&str] = &["Anna", "Ivan", "Maria", "Oleg", "Elena", "Pavel", "Daria"];
const LAST_NAMES: &[&str] = &["Smirnova", "Petrov", "Ivanova", "Sokolov", "Kuznetsova"];
const MONTHS: &[&str] = &["January", "February", "March", "April", "May", "June"];

const BODIES: &[&str] = &[
    "Great service, friendly staff.",
    "",
    "Ordered twice this month. Delivery was on time both times and the packaging \
     was neat. Would have given five stars if the second order had not been missing \
     a side dish.",
    "Fine.",
    "The place is cozy but it gets very loud in the evenings, so come early if you \
     want to talk. Prices are fair for the portion sizes. The staff remembered my \
     usual order after the second visit, which I appreciated a lot.",
];

/// Generate `count` reviews with varied names, ratings and body lengths.
///
/// The same `count` always yields the same records.
pub fn synthetic_records(count: usize) -> Vec<ReviewRecord> {
    (0..count)
        .map(|i| {
            ReviewRecord::new(
                FIRST_NAMES[i % FIRST_NAMES.len()],
                LAST_NAMES[(i / FIRST_NAMES.len()) % LAST_NAMES.len()],
                Rating::saturating((i % 5) as i64 + 1),
                BODIES[(i * 3) % BODIES.len()],
                format!("{} {} 2024", i % 28 + 1, MONTHS[(i / 28) % MONTHS.len()]),
            )
        })
        .collect()
}
