//! Year catalog resolver

use pralinen_common::{time, Result};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableYears {
    /// Populated years plus one not-yet-populated successor
    pub years: Vec<i32>,
    /// Wall-clock year, informational only
    pub current_year: i32,
    pub next_year: i32,
}

/// Derive the catalog from the years in use and the wall-clock year.
///
/// `existing` need not be sorted or distinct.
pub fn build_catalog(mut existing: Vec<i32>, current_year: i32) -> AvailableYears {
    existing.sort_unstable();
    existing.dedup();

    match existing.last().copied() {
        // `last` is the maximum, so its successor is never already present
        Some(last) => existing.push(last + 1),
        None => existing.push(current_year + 1),
    }

    AvailableYears {
        years: existing,
        current_year,
        next_year: current_year + 1,
    }
}

pub async fn available_years(pool: &SqlitePool) -> Result<AvailableYears> {
    let existing = db::years::distinct_years(pool).await?;
    Ok(build_catalog(existing, time::current_year()))
}
