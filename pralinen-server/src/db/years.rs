//! Year queries

use pralinen_common::Result;
use sqlx::SqliteExecutor;

/// Distinct years present in person_years or pralines, ascending
pub async fn distinct_years(ex: impl SqliteExecutor<'_>) -> Result<Vec<i32>> {
    let years = sqlx::query_scalar::<_, i32>(
        "SELECT year FROM person_years UNION SELECT year FROM pralines ORDER BY year ASC",
    )
    .fetch_all(ex)
    .await?;

    Ok(years)
}
