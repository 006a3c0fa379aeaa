//! Entity store queries
//!
//! Every function takes any SQLite executor so the same query runs against
//! the pool or inside a transaction (`&mut *tx`). Timestamps are supplied by
//! the calling service, never by request input.

pub mod person_years;
pub mod persons;
pub mod pralines;
pub mod ratings;
pub mod years;
