//! Praline persistence

use chrono::{DateTime, Utc};
use pralinen_common::db::Praline;
use pralinen_common::Result;
use sqlx::SqliteExecutor;

const PRALINE_COLUMNS: &str =
    "id, year, name, description, is_vegan, image_path, created_at, updated_at";

/// Fields for a new catalog entry
#[derive(Debug, Clone)]
pub struct NewPraline {
    pub year: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_vegan: bool,
    pub image_path: String,
}

/// Column changes for an existing praline; `None` leaves a column as is.
///
/// `description` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct PralineChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_vegan: Option<bool>,
    pub image_path: Option<String>,
}

/// Catalog for one year, ordered by name
pub async fn list_pralines_for_year(ex: impl SqliteExecutor<'_>, year: i32) -> Result<Vec<Praline>> {
    let pralines = sqlx::query_as::<_, Praline>(&format!(
        "SELECT {} FROM pralines WHERE year = ? ORDER BY name, id",
        PRALINE_COLUMNS
    ))
    .bind(year)
    .fetch_all(ex)
    .await?;

    Ok(pralines)
}

/// Load praline only if it belongs to `year`
pub async fn find_praline_in_year(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    year: i32,
) -> Result<Option<Praline>> {
    let praline = sqlx::query_as::<_, Praline>(&format!(
        "SELECT {} FROM pralines WHERE id = ? AND year = ?",
        PRALINE_COLUMNS
    ))
    .bind(id)
    .bind(year)
    .fetch_optional(ex)
    .await?;

    Ok(praline)
}

pub async fn insert_praline(
    ex: impl SqliteExecutor<'_>,
    new: &NewPraline,
    now: DateTime<Utc>,
) -> Result<Praline> {
    let praline = sqlx::query_as::<_, Praline>(&format!(
        r#"
        INSERT INTO pralines (year, name, description, is_vegan, image_path, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING {}
        "#,
        PRALINE_COLUMNS
    ))
    .bind(new.year)
    .bind(&new.name)
    .bind(&new.description)
    .bind(new.is_vegan)
    .bind(&new.image_path)
    .bind(now)
    .bind(now)
    .fetch_one(ex)
    .await?;

    Ok(praline)
}

pub async fn update_praline(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    changes: &PralineChanges,
    now: DateTime<Utc>,
) -> Result<Option<Praline>> {
    let (set_description, description) = match &changes.description {
        Some(value) => (true, value.clone()),
        None => (false, None),
    };

    let praline = sqlx::query_as::<_, Praline>(&format!(
        r#"
        UPDATE pralines SET
            name = COALESCE(?, name),
            description = CASE WHEN ? THEN ? ELSE description END,
            is_vegan = COALESCE(?, is_vegan),
            image_path = COALESCE(?, image_path),
            updated_at = ?
        WHERE id = ?
        RETURNING {}
        "#,
        PRALINE_COLUMNS
    ))
    .bind(&changes.name)
    .bind(set_description)
    .bind(description)
    .bind(changes.is_vegan)
    .bind(&changes.image_path)
    .bind(now)
    .bind(id)
    .fetch_optional(ex)
    .await?;

    Ok(praline)
}

/// Delete a praline row, returning it if it existed
pub async fn delete_praline(ex: impl SqliteExecutor<'_>, id: i64) -> Result<Option<Praline>> {
    let praline = sqlx::query_as::<_, Praline>(&format!(
        "DELETE FROM pralines WHERE id = ? RETURNING {}",
        PRALINE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(ex)
    .await?;

    Ok(praline)
}

/// Number of person-years naming this praline as favorite
pub async fn count_favorites(ex: impl SqliteExecutor<'_>, praline_id: i64) -> Result<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM person_years WHERE favorite_chocolate_id = ?")
            .bind(praline_id)
            .fetch_one(ex)
            .await?;

    Ok(count)
}
