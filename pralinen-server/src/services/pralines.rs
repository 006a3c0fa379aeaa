//! Admin praline catalog operations

use pralinen_common::db::Praline;
use pralinen_common::{time, validate_year, Error, Result};
use sqlx::SqlitePool;
use tracing::info;

use super::patch::PralinePatch;
use super::validation::{optional_text, required_text, MAX_DESCRIPTION_CHARS, MAX_NAME_CHARS};
use crate::db;
use crate::db::pralines::{NewPraline, PralineChanges};

/// Catalog of one year, ordered by name
pub async fn pralines_for_year(pool: &SqlitePool, year: i64) -> Result<Vec<Praline>> {
    let year = validate_year(year)?;
    db::pralines::list_pralines_for_year(pool, year).await
}

/// Add a praline to a year's catalog.
///
/// `image_path` is stored as given; it is an opaque asset reference.
pub async fn create_praline(
    pool: &SqlitePool,
    year: i64,
    name: &str,
    description: Option<&str>,
    is_vegan: bool,
    image_path: Option<&str>,
) -> Result<Praline> {
    let year = validate_year(year)?;
    let new = NewPraline {
        year,
        name: required_text("name", name, MAX_NAME_CHARS)?,
        description: optional_text("description", description, MAX_DESCRIPTION_CHARS)?,
        is_vegan,
        image_path: image_path.unwrap_or_default().to_string(),
    };

    let praline = db::pralines::insert_praline(pool, &new, time::now()).await?;
    info!(praline_id = praline.id, year, "Created praline");
    Ok(praline)
}

pub async fn update_praline(pool: &SqlitePool, id: i64, patch: &PralinePatch) -> Result<Praline> {
    let changes = PralineChanges {
        name: patch
            .name
            .as_deref()
            .map(|v| required_text("name", v, MAX_NAME_CHARS))
            .transpose()?,
        description: match &patch.description {
            Some(value) => Some(optional_text(
                "description",
                value.as_deref(),
                MAX_DESCRIPTION_CHARS,
            )?),
            None => None,
        },
        is_vegan: patch.is_vegan,
        image_path: patch.image_path.clone(),
    };

    let praline = db::pralines::update_praline(pool, id, &changes, time::now())
        .await?
        .ok_or_else(|| Error::NotFound(format!("praline {}", id)))?;

    info!(praline_id = id, "Updated praline");
    Ok(praline)
}
