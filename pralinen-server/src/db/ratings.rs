//! Rating persistence

use chrono::{DateTime, Utc};
use pralinen_common::db::Rating;
use pralinen_common::Result;
use sqlx::SqliteExecutor;

const RATING_COLUMNS: &str =
    "id, person_year_id, praline_id, rating, comment, created_at, updated_at";

/// All ratings of one respondent
pub async fn list_for_person_year(
    ex: impl SqliteExecutor<'_>,
    person_year_id: i64,
) -> Result<Vec<Rating>> {
    let ratings = sqlx::query_as::<_, Rating>(&format!(
        "SELECT {} FROM ratings WHERE person_year_id = ? ORDER BY praline_id",
        RATING_COLUMNS
    ))
    .bind(person_year_id)
    .fetch_all(ex)
    .await?;

    Ok(ratings)
}

/// Insert a rating unless one exists for the pair.
///
/// Returns `None` when `person_year_praline_unique` already holds a row.
pub async fn insert_if_absent(
    ex: impl SqliteExecutor<'_>,
    person_year_id: i64,
    praline_id: i64,
    rating: i64,
    comment: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<Rating>> {
    let inserted = sqlx::query_as::<_, Rating>(&format!(
        r#"
        INSERT INTO ratings (person_year_id, praline_id, rating, comment, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT (person_year_id, praline_id) DO NOTHING
        RETURNING {}
        "#,
        RATING_COLUMNS
    ))
    .bind(person_year_id)
    .bind(praline_id)
    .bind(rating)
    .bind(comment)
    .bind(now)
    .bind(now)
    .fetch_optional(ex)
    .await?;

    Ok(inserted)
}

/// Overwrite score and comment of the pair's rating
pub async fn update_for_pair(
    ex: impl SqliteExecutor<'_>,
    person_year_id: i64,
    praline_id: i64,
    rating: i64,
    comment: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<Rating>> {
    let updated = sqlx::query_as::<_, Rating>(&format!(
        r#"
        UPDATE ratings SET rating = ?, comment = ?, updated_at = ?
        WHERE person_year_id = ? AND praline_id = ?
        RETURNING {}
        "#,
        RATING_COLUMNS
    ))
    .bind(rating)
    .bind(comment)
    .bind(now)
    .bind(person_year_id)
    .bind(praline_id)
    .fetch_optional(ex)
    .await?;

    Ok(updated)
}

pub async fn count_for_praline(ex: impl SqliteExecutor<'_>, praline_id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ratings WHERE praline_id = ?")
        .bind(praline_id)
        .fetch_one(ex)
        .await?;

    Ok(count)
}

/// Ratings owned by any PersonYear of the person
pub async fn count_for_person(ex: impl SqliteExecutor<'_>, person_id: i64) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM ratings r
        JOIN person_years py ON py.id = r.person_year_id
        WHERE py.person_id = ?
        "#,
    )
    .bind(person_id)
    .fetch_one(ex)
    .await?;

    Ok(count)
}
