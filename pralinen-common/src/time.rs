//! Timestamp utilities

use chrono::{DateTime, Datelike, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Wall-clock calendar year (UTC)
pub fn current_year() -> i32 {
    Utc::now().year()
}
