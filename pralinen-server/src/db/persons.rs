//! Person persistence

use chrono::{DateTime, Utc};
use pralinen_common::db::{Person, PersonWithYear, PersonYear};
use pralinen_common::Result;
use sqlx::{Row, SqliteExecutor};

/// List all persons
pub async fn list_persons(ex: impl SqliteExecutor<'_>) -> Result<Vec<Person>> {
    let persons = sqlx::query_as::<_, Person>(
        "SELECT id, first_name, last_name, created_at, updated_at FROM persons ORDER BY id",
    )
    .fetch_all(ex)
    .await?;

    Ok(persons)
}

/// Load person by id
pub async fn find_person(ex: impl SqliteExecutor<'_>, id: i64) -> Result<Option<Person>> {
    let person = sqlx::query_as::<_, Person>(
        "SELECT id, first_name, last_name, created_at, updated_at FROM persons WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(ex)
    .await?;

    Ok(person)
}

/// Insert a person and return the stored row
pub async fn insert_person(
    ex: impl SqliteExecutor<'_>,
    first_name: &str,
    last_name: &str,
    now: DateTime<Utc>,
) -> Result<Person> {
    let person = sqlx::query_as::<_, Person>(
        r#"
        INSERT INTO persons (first_name, last_name, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, first_name, last_name, created_at, updated_at
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(now)
    .bind(now)
    .fetch_one(ex)
    .await?;

    Ok(person)
}

/// Apply supplied name fields; `None` leaves the column unchanged
pub async fn update_person(
    ex: impl SqliteExecutor<'_>,
    id: i64,
    first_name: Option<&str>,
    last_name: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Option<Person>> {
    let person = sqlx::query_as::<_, Person>(
        r#"
        UPDATE persons SET
            first_name = COALESCE(?, first_name),
            last_name = COALESCE(?, last_name),
            updated_at = ?
        WHERE id = ?
        RETURNING id, first_name, last_name, created_at, updated_at
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(now)
    .bind(id)
    .fetch_optional(ex)
    .await?;

    Ok(person)
}

/// Delete a person row, returning it if it existed
pub async fn delete_person(ex: impl SqliteExecutor<'_>, id: i64) -> Result<Option<Person>> {
    let person = sqlx::query_as::<_, Person>(
        "DELETE FROM persons WHERE id = ? RETURNING id, first_name, last_name, created_at, updated_at",
    )
    .bind(id)
    .fetch_optional(ex)
    .await?;

    Ok(person)
}

/// All persons left-joined with their PersonYear for `year`.
///
/// Persons without a record for that year appear with `person_year = None`.
pub async fn list_persons_with_year(
    ex: impl SqliteExecutor<'_>,
    year: i32,
) -> Result<Vec<PersonWithYear>> {
    let rows = sqlx::query(
        r#"
        SELECT
            p.id, p.first_name, p.last_name, p.created_at, p.updated_at,
            py.id AS py_id, py.signature AS py_signature,
            py.is_participating AS py_is_participating,
            py.favorite_chocolate_id AS py_favorite_chocolate_id,
            py.general_feedback AS py_general_feedback,
            py.allergies AS py_allergies,
            py.created_at AS py_created_at, py.updated_at AS py_updated_at
        FROM persons p
        LEFT JOIN person_years py ON py.person_id = p.id AND py.year = ?
        ORDER BY p.last_name, p.first_name, p.id
        "#,
    )
    .bind(year)
    .fetch_all(ex)
    .await?;

    let mut result = Vec::with_capacity(rows.len());
    for row in rows {
        let person = Person {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        };

        let py_id: Option<i64> = row.try_get("py_id")?;
        let person_year = match py_id {
            Some(py_id) => Some(PersonYear {
                id: py_id,
                person_id: person.id,
                year,
                signature: row.try_get("py_signature")?,
                is_participating: row.try_get("py_is_participating")?,
                favorite_chocolate_id: row.try_get("py_favorite_chocolate_id")?,
                general_feedback: row.try_get("py_general_feedback")?,
                allergies: row.try_get("py_allergies")?,
                created_at: row.try_get("py_created_at")?,
                updated_at: row.try_get("py_updated_at")?,
            }),
            None => None,
        };

        result.push(PersonWithYear::new(person, person_year));
    }

    Ok(result)
}
