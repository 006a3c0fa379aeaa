//! Rating upsert and respondent feedback

use pralinen_common::db::{PersonYear, Rating};
use pralinen_common::{time, Error, Result, Signature};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

use super::validation::{
    check_stars, optional_text, MAX_ALLERGIES_CHARS, MAX_COMMENT_CHARS, MAX_FEEDBACK_CHARS,
};
use crate::db;

/// What an upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingUpsert {
    pub rating: Rating,
    pub action: RatingAction,
}

/// Record or amend one respondent's rating of one praline.
///
/// The insert is attempted first and falls through to an update when the
/// pair already exists, both inside one transaction, so concurrent
/// submissions for the same pair converge on a single row.
pub async fn submit_rating(
    pool: &SqlitePool,
    signature: &str,
    praline_id: i64,
    stars: i64,
    comment: Option<&str>,
) -> Result<RatingUpsert> {
    let signature = Signature::parse(signature)?;
    let stars = check_stars(stars)?;
    let comment = optional_text("comment", comment, MAX_COMMENT_CHARS)?;

    let person_year = db::person_years::find_by_signature(pool, &signature)
        .await?
        .ok_or_else(|| Error::NotFound("signature".to_string()))?;

    if db::pralines::find_praline_in_year(pool, praline_id, person_year.year)
        .await?
        .is_none()
    {
        return Err(Error::PralineYearMismatch {
            praline_id,
            year: person_year.year,
        });
    }

    let now = time::now();
    let mut tx = pool.begin().await?;

    let inserted = db::ratings::insert_if_absent(
        &mut *tx,
        person_year.id,
        praline_id,
        stars,
        comment.as_deref(),
        now,
    )
    .await?;

    let upsert = match inserted {
        Some(rating) => RatingUpsert {
            rating,
            action: RatingAction::Created,
        },
        None => {
            let rating = db::ratings::update_for_pair(
                &mut *tx,
                person_year.id,
                praline_id,
                stars,
                comment.as_deref(),
                now,
            )
            .await?
            .ok_or_else(|| Error::NotFound(format!("rating for praline {}", praline_id)))?;
            RatingUpsert {
                rating,
                action: RatingAction::Updated,
            }
        }
    };

    tx.commit().await?;

    info!(
        person_year_id = person_year.id,
        praline_id,
        action = ?upsert.action,
        "Rating stored"
    );
    Ok(upsert)
}

/// Respondent-owned PersonYear fields.
///
/// This is a full overwrite: anything not supplied (or empty) is stored as
/// absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackUpdate {
    #[serde(default)]
    pub favorite_chocolate_id: Option<i64>,
    #[serde(default)]
    pub general_feedback: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
}

pub async fn update_feedback(
    pool: &SqlitePool,
    signature: &str,
    update: &FeedbackUpdate,
) -> Result<PersonYear> {
    let signature = Signature::parse(signature)?;
    let general_feedback = optional_text(
        "generalFeedback",
        update.general_feedback.as_deref(),
        MAX_FEEDBACK_CHARS,
    )?;
    let allergies = optional_text("allergies", update.allergies.as_deref(), MAX_ALLERGIES_CHARS)?;

    let person_year = db::person_years::find_by_signature(pool, &signature)
        .await?
        .ok_or_else(|| Error::NotFound("signature".to_string()))?;

    if let Some(favorite_id) = update.favorite_chocolate_id {
        if db::pralines::find_praline_in_year(pool, favorite_id, person_year.year)
            .await?
            .is_none()
        {
            return Err(Error::FavoriteYearMismatch {
                praline_id: favorite_id,
                year: person_year.year,
            });
        }
    }

    let updated = db::person_years::update_feedback(
        pool,
        person_year.id,
        update.favorite_chocolate_id,
        general_feedback.as_deref(),
        allergies.as_deref(),
        time::now(),
    )
    .await?
    .ok_or_else(|| Error::NotFound(format!("person year {}", person_year.id)))?;

    info!(person_year_id = updated.id, "Feedback updated");
    Ok(updated)
}
