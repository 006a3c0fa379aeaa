//! PersonYear persistence
//!
//! Inserts surface the raw `sqlx::Error` so callers can tell a signature
//! collision (retryable) from every other failure.

use chrono::{DateTime, Utc};
use pralinen_common::db::PersonYear;
use pralinen_common::{Result, Signature};
use sqlx::SqliteExecutor;

const PERSON_YEAR_COLUMNS: &str = "id, person_id, year, signature, is_participating, \
     favorite_chocolate_id, general_feedback, allergies, created_at, updated_at";

/// Resolve a signature to its PersonYear.
///
/// Signatures are only unique within a year; if the same value exists in
/// several years the most recent year wins.
pub async fn find_by_signature(
    ex: impl SqliteExecutor<'_>,
    signature: &Signature,
) -> Result<Option<PersonYear>> {
    let person_year = sqlx::query_as::<_, PersonYear>(&format!(
        "SELECT {} FROM person_years WHERE signature = ? ORDER BY year DESC LIMIT 1",
        PERSON_YEAR_COLUMNS
    ))
    .bind(signature.as_str())
    .fetch_optional(ex)
    .await?;

    Ok(person_year)
}

pub async fn find_for_person_and_year(
    ex: impl SqliteExecutor<'_>,
    person_id: i64,
    year: i32,
) -> Result<Option<PersonYear>> {
    let person_year = sqlx::query_as::<_, PersonYear>(&format!(
        "SELECT {} FROM person_years WHERE person_id = ? AND year = ?",
        PERSON_YEAR_COLUMNS
    ))
    .bind(person_id)
    .bind(year)
    .fetch_optional(ex)
    .await?;

    Ok(person_year)
}

/// Insert a PersonYear with the given signature
pub async fn insert_person_year(
    ex: impl SqliteExecutor<'_>,
    person_id: i64,
    year: i32,
    signature: &Signature,
    is_participating: bool,
    now: DateTime<Utc>,
) -> std::result::Result<PersonYear, sqlx::Error> {
    sqlx::query_as::<_, PersonYear>(&format!(
        r#"
        INSERT INTO person_years (person_id, year, signature, is_participating, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        PERSON_YEAR_COLUMNS
    ))
    .bind(person_id)
    .bind(year)
    .bind(signature.as_str())
    .bind(is_participating)
    .bind(now)
    .bind(now)
    .fetch_one(ex)
    .await
}

/// Create a participating PersonYear unless the person already has one for
/// the year.
///
/// Returns `Ok(None)` when `person_year_unique` already holds a row, so
/// concurrent callers end up with one row. A collision on
/// `signature_year_unique` is returned as an error.
pub async fn insert_participating_if_absent(
    ex: impl SqliteExecutor<'_>,
    person_id: i64,
    year: i32,
    signature: &Signature,
    now: DateTime<Utc>,
) -> std::result::Result<Option<PersonYear>, sqlx::Error> {
    sqlx::query_as::<_, PersonYear>(&format!(
        r#"
        INSERT INTO person_years (person_id, year, signature, is_participating, created_at, updated_at)
        VALUES (?, ?, ?, 1, ?, ?)
        ON CONFLICT (person_id, year) DO NOTHING
        RETURNING {}
        "#,
        PERSON_YEAR_COLUMNS
    ))
    .bind(person_id)
    .bind(year)
    .bind(signature.as_str())
    .bind(now)
    .bind(now)
    .fetch_optional(ex)
    .await
}

/// Set the participation flag on an existing record
pub async fn set_participating(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    is_participating: bool,
    now: DateTime<Utc>,
) -> Result<Option<PersonYear>> {
    let person_year = sqlx::query_as::<_, PersonYear>(&format!(
        "UPDATE person_years SET is_participating = ?, updated_at = ? WHERE id = ? RETURNING {}",
        PERSON_YEAR_COLUMNS
    ))
    .bind(is_participating)
    .bind(now)
    .bind(id)
    .fetch_optional(ex)
    .await?;

    Ok(person_year)
}

/// Overwrite the respondent-owned feedback fields
pub async fn update_feedback(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    favorite_chocolate_id: Option<i64>,
    general_feedback: Option<&str>,
    allergies: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<PersonYear>> {
    let person_year = sqlx::query_as::<_, PersonYear>(&format!(
        r#"
        UPDATE person_years SET
            favorite_chocolate_id = ?,
            general_feedback = ?,
            allergies = ?,
            updated_at = ?
        WHERE id = ?
        RETURNING {}
        "#,
        PERSON_YEAR_COLUMNS
    ))
    .bind(favorite_chocolate_id)
    .bind(general_feedback)
    .bind(allergies)
    .bind(now)
    .bind(id)
    .fetch_optional(ex)
    .await?;

    Ok(person_year)
}

/// Delete every PersonYear of a person, returning the number removed
pub async fn delete_for_person(ex: impl SqliteExecutor<'_>, person_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM person_years WHERE person_id = ?")
        .bind(person_id)
        .execute(ex)
        .await?;

    Ok(result.rows_affected())
}
