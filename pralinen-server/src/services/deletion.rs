//! Deletion guard
//!
//! Pralines and persons are only deleted when nothing references them.
//! The guard checks run first and refuse with a specific reason; the
//! `ON DELETE RESTRICT` foreign keys catch anything that slips in between
//! the check and the delete.

use pralinen_common::db::{Person, Praline};
use pralinen_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db;

/// Delete a praline that no rating and no favorite refers to
pub async fn delete_praline(pool: &SqlitePool, id: i64) -> Result<Praline> {
    let ratings = db::ratings::count_for_praline(pool, id).await?;
    if ratings > 0 {
        warn!(praline_id = id, ratings, "Refused praline deletion: rated");
        return Err(Error::ReferencedByRatings {
            entity: "praline",
            id,
            count: ratings,
        });
    }

    let favorites = db::pralines::count_favorites(pool, id).await?;
    if favorites > 0 {
        warn!(praline_id = id, favorites, "Refused praline deletion: favorite");
        return Err(Error::ReferencedAsFavorite {
            id,
            count: favorites,
        });
    }

    let deleted = db::pralines::delete_praline(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("praline {}", id)))?;

    info!(praline_id = id, "Deleted praline");
    Ok(deleted)
}

/// Delete a person and their unrated PersonYears.
///
/// Refused with `ReferencedByRatings` while any of the person's PersonYears
/// owns a rating. PersonYears and the person row go in one transaction.
pub async fn delete_person(pool: &SqlitePool, id: i64) -> Result<Person> {
    if db::persons::find_person(pool, id).await?.is_none() {
        return Err(Error::NotFound(format!("person {}", id)));
    }

    let ratings = db::ratings::count_for_person(pool, id).await?;
    if ratings > 0 {
        warn!(person_id = id, ratings, "Refused person deletion: rated");
        return Err(Error::ReferencedByRatings {
            entity: "person",
            id,
            count: ratings,
        });
    }

    let mut tx = pool.begin().await?;
    let person_years = db::person_years::delete_for_person(&mut *tx, id).await?;
    let deleted = db::persons::delete_person(&mut *tx, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("person {}", id)))?;
    tx.commit().await?;

    info!(person_id = id, person_years, "Deleted person");
    Ok(deleted)
}
