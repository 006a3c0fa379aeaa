//! Admin person operations

use pralinen_common::db::{Person, PersonWithYear};
use pralinen_common::{time, validate_year, Error, Result};
use sqlx::SqlitePool;
use tracing::info;

use super::patch::PersonPatch;
use super::validation::{required_text, MAX_NAME_CHARS};
use crate::db;

pub async fn list_persons(pool: &SqlitePool) -> Result<Vec<Person>> {
    db::persons::list_persons(pool).await
}

/// Create a person without any participation record
pub async fn create_person(pool: &SqlitePool, first_name: &str, last_name: &str) -> Result<Person> {
    let first_name = required_text("firstName", first_name, MAX_NAME_CHARS)?;
    let last_name = required_text("lastName", last_name, MAX_NAME_CHARS)?;

    let person = db::persons::insert_person(pool, &first_name, &last_name, time::now()).await?;
    info!(person_id = person.id, "Created person");
    Ok(person)
}

/// Apply the supplied name fields; `updated_at` is always refreshed
pub async fn update_person(pool: &SqlitePool, id: i64, patch: &PersonPatch) -> Result<Person> {
    let first_name = patch
        .first_name
        .as_deref()
        .map(|v| required_text("firstName", v, MAX_NAME_CHARS))
        .transpose()?;
    let last_name = patch
        .last_name
        .as_deref()
        .map(|v| required_text("lastName", v, MAX_NAME_CHARS))
        .transpose()?;

    let person = db::persons::update_person(
        pool,
        id,
        first_name.as_deref(),
        last_name.as_deref(),
        time::now(),
    )
    .await?
    .ok_or_else(|| Error::NotFound(format!("person {}", id)))?;

    info!(person_id = id, "Updated person");
    Ok(person)
}

/// Year-scoped read: every person with its (possibly absent) PersonYear
pub async fn persons_for_year(pool: &SqlitePool, year: i64) -> Result<Vec<PersonWithYear>> {
    let year = validate_year(year)?;
    db::persons::list_persons_with_year(pool, year).await
}
