//! Accepted participation years
//!
//! Every year-bearing operation accepts integers in `(2020, 2050]` and checks
//! this before any other validation.

use crate::{Error, Result};

/// Exclusive lower bound
pub const MIN_YEAR_EXCLUSIVE: i64 = 2020;

/// Inclusive upper bound
pub const MAX_YEAR: i64 = 2050;

/// Validate a year and narrow it to the store's integer width.
pub fn validate_year(year: i64) -> Result<i32> {
    if year <= MIN_YEAR_EXCLUSIVE || year > MAX_YEAR {
        return Err(Error::InvalidRange { year });
    }
    Ok(year as i32)
}
