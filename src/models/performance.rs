//! Performance review model.
//!
//! A [`PerformanceRecord`] is one dated review appended to an employee's
//! history. Ratings are validated through [`Rating`] before a record can
//! be constructed, so a stored record always carries a rating in `1..=5`.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Lowest accepted review rating.
pub const MIN_RATING: i32 = 1;

/// Highest accepted review rating.
pub const MAX_RATING: i32 = 5;

/// A review rating in the range `1..=5`.
///
/// # Examples
///
/// ```
/// use payroll_ledger::models::Rating;
///
/// assert_eq!(Rating::new(4).unwrap().value(), 4);
/// assert!(Rating::new(0).is_err());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(u8);

impl Rating {
    /// Validates a raw rating, rejecting anything outside `1..=5`.
    pub fn new(value: i32) -> LedgerResult<Self> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(LedgerError::InvalidInput {
                field: "rating".to_string(),
                message: format!(
                    "must be between {} and {}, got {}",
                    MIN_RATING, MAX_RATING, value
                ),
            })
        }
    }

    /// Returns the rating as a plain integer.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = LedgerError;

    fn try_from(value: i32) -> LedgerResult<Self> {
        Self::new(value)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        i32::from(rating.0)
    }
}

/// One dated performance review.
///
/// The `date` is free-form text and is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    rating: Rating,
    review: String,
    date: String,
    reviewed_by: String,
}

impl PerformanceRecord {
    /// Creates a record from an already validated rating.
    pub fn new(
        rating: Rating,
        review: impl Into<String>,
        date: impl Into<String>,
        reviewed_by: impl Into<String>,
    ) -> Self {
        Self {
            rating,
            review: review.into(),
            date: date.into(),
            reviewed_by: reviewed_by.into(),
        }
    }

    /// The review rating.
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// The review text.
    pub fn review(&self) -> &str {
        &self.review
    }

    /// The date the review was entered, as given.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Who wrote the review.
    pub fn reviewed_by(&self) -> &str {
        &self.reviewed_by
    }
}
