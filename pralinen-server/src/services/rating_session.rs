//! Rating session resolver
//!
//! Rebuilds an anonymous respondent's view from their signature. Read-only:
//! nothing is created or modified, not even a missing PersonYear.

use pralinen_common::db::{Person, PersonYear, Praline, Rating};
use pralinen_common::{Error, Result, Signature};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use tracing::debug;

use crate::db;

/// Rating progress of one respondent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub total: usize,
    pub rated: usize,
    pub percentage: u32,
}

impl Progress {
    /// `percentage = round(100 * rated / total)`, or 0 for an empty catalog
    pub fn new(total: usize, rated: usize) -> Self {
        let percentage = if total > 0 {
            (rated as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };
        Self {
            total,
            rated,
            percentage,
        }
    }
}

/// Everything the rating page needs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub person_year: PersonYear,
    pub person: Person,
    pub pralines: Vec<Praline>,
    /// The respondent's rating per praline id
    pub ratings: BTreeMap<i64, Rating>,
    pub progress: Progress,
}

pub async fn resolve_session(pool: &SqlitePool, signature: &str) -> Result<SessionView> {
    let signature = Signature::parse(signature)?;

    let person_year = db::person_years::find_by_signature(pool, &signature)
        .await?
        .ok_or_else(|| Error::NotFound("signature".to_string()))?;

    let person = db::persons::find_person(pool, person_year.person_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("person {}", person_year.person_id)))?;

    let pralines = db::pralines::list_pralines_for_year(pool, person_year.year).await?;
    let ratings: BTreeMap<i64, Rating> =
        db::ratings::list_for_person_year(pool, person_year.id)
            .await?
            .into_iter()
            .map(|rating| (rating.praline_id, rating))
            .collect();

    let progress = Progress::new(pralines.len(), ratings.len());
    debug!(
        person_year_id = person_year.id,
        total = progress.total,
        rated = progress.rated,
        "Resolved rating session"
    );

    Ok(SessionView {
        person_year,
        person,
        pralines,
        ratings,
        progress,
    })
}
