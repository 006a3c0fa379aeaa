//! Enrollment: a new person and their first PersonYear, atomically

use pralinen_common::db::PersonWithYear;
use pralinen_common::{generate_signature, time, validate_year, Result};
use rand::Rng;
use sqlx::SqlitePool;
use tracing::info;

use super::validation::{required_text, MAX_NAME_CHARS};
use crate::db;
use crate::utils::check_signature_collision;

/// Create a person participating in `year`.
///
/// Both inserts share one transaction; any failure after the person insert
/// rolls it back so no person without a PersonYear is left behind.
pub async fn enroll_person<R: Rng + Send>(
    pool: &SqlitePool,
    rng: &mut R,
    year: i64,
    first_name: &str,
    last_name: &str,
) -> Result<PersonWithYear> {
    let year = validate_year(year)?;
    let first_name = required_text("firstName", first_name, MAX_NAME_CHARS)?;
    let last_name = required_text("lastName", last_name, MAX_NAME_CHARS)?;
    let now = time::now();

    let mut tx = pool.begin().await?;

    let person = db::persons::insert_person(&mut *tx, &first_name, &last_name, now).await?;

    let mut attempt = 0;
    let person_year = loop {
        attempt += 1;
        let signature = generate_signature(rng);
        match db::person_years::insert_person_year(&mut *tx, person.id, year, &signature, true, now)
            .await
        {
            Ok(person_year) => break person_year,
            Err(err) => check_signature_collision("enroll_person", attempt, err)?,
        }
    };

    tx.commit().await?;

    info!(
        person_id = person.id,
        person_year_id = person_year.id,
        year,
        "Enrolled person"
    );
    Ok(PersonWithYear::new(person, Some(person_year)))
}
