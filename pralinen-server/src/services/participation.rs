//! Participation toggle
//!
//! Enabling creates the PersonYear on first use; disabling only flips the
//! flag so the signature, feedback and ratings survive.

use chrono::{DateTime, Utc};
use pralinen_common::db::PersonYear;
use pralinen_common::{generate_signature, time, validate_year, Error, Result};
use rand::Rng;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db;
use crate::utils::check_signature_collision;

/// Message returned when disabling a person that never had a record
pub const ALREADY_NOT_PARTICIPATING: &str = "Person is already not participating";

/// Result of a participation toggle.
///
/// Serializes as the PersonYear itself, or as `{"message": ...}` for the
/// no-op case.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParticipationOutcome {
    /// A new PersonYear was created with a fresh signature
    Created(PersonYear),
    /// The existing PersonYear's flag was set
    Updated(PersonYear),
    /// Disabling with no record: nothing to do
    Unchanged { message: &'static str },
}

impl ParticipationOutcome {
    pub fn person_year(&self) -> Option<&PersonYear> {
        match self {
            ParticipationOutcome::Created(py) | ParticipationOutcome::Updated(py) => Some(py),
            ParticipationOutcome::Unchanged { .. } => None,
        }
    }
}

/// Set a person's participation for a year.
///
/// Fails with `InvalidRange` before anything else, then `NotFound` for an
/// unknown person.
pub async fn set_participation<R: Rng + Send>(
    pool: &SqlitePool,
    rng: &mut R,
    person_id: i64,
    year: i64,
    is_participating: bool,
) -> Result<ParticipationOutcome> {
    let year = validate_year(year)?;

    if db::persons::find_person(pool, person_id).await?.is_none() {
        return Err(Error::NotFound(format!("person {}", person_id)));
    }

    let existing = db::person_years::find_for_person_and_year(pool, person_id, year).await?;
    let now = time::now();

    match (existing, is_participating) {
        (Some(existing), flag) => {
            let updated = set_flag(pool, existing.id, flag, now).await?;
            info!(person_id, year, is_participating = flag, "Participation updated");
            Ok(ParticipationOutcome::Updated(updated))
        }
        (None, true) => {
            let mut attempt = 0;
            loop {
                attempt += 1;
                let signature = generate_signature(rng);
                match db::person_years::insert_participating_if_absent(
                    pool, person_id, year, &signature, now,
                )
                .await
                {
                    Ok(Some(person_year)) => {
                        info!(
                            person_id,
                            year,
                            person_year_id = person_year.id,
                            "Participation enabled"
                        );
                        return Ok(ParticipationOutcome::Created(person_year));
                    }
                    Ok(None) => {
                        // created concurrently since the lookup above
                        let existing =
                            db::person_years::find_for_person_and_year(pool, person_id, year)
                                .await?
                                .ok_or_else(|| {
                                    Error::NotFound(format!("person year {}/{}", person_id, year))
                                })?;
                        let updated = set_flag(pool, existing.id, true, now).await?;
                        debug!(person_id, year, "Participation enabled by a concurrent request");
                        return Ok(ParticipationOutcome::Updated(updated));
                    }
                    Err(err) => check_signature_collision("set_participation", attempt, err)?,
                }
            }
        }
        (None, false) => {
            debug!(person_id, year, "No participation record to disable");
            Ok(ParticipationOutcome::Unchanged {
                message: ALREADY_NOT_PARTICIPATING,
            })
        }
    }
}

async fn set_flag(
    pool: &SqlitePool,
    id: i64,
    is_participating: bool,
    now: DateTime<Utc>,
) -> Result<PersonYear> {
    db::person_years::set_participating(pool, id, is_participating, now)
        .await?
        .ok_or_else(|| Error::NotFound(format!("person year {}", id)))
}
