//! Admin praline endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, patch},
    Json, Router,
};
use pralinen_common::db::Praline;
use serde::Deserialize;

use super::params::year_param;
use crate::services::{self, PralinePatch};
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePralineRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_vegan: bool,
    #[serde(default)]
    pub image_path: Option<String>,
}

/// GET /api/admin/years/:year/pralines
pub async fn pralines_for_year(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> ApiResult<Json<Vec<Praline>>> {
    let year = year_param(&year)?;
    Ok(Json(services::pralines::pralines_for_year(&state.db, year).await?))
}

/// POST /api/admin/years/:year/pralines
pub async fn create_praline(
    State(state): State<AppState>,
    Path(year): Path<String>,
    payload: Result<Json<CreatePralineRequest>, JsonRejection>,
) -> ApiResult<Json<Praline>> {
    let year = year_param(&year)?;
    let Json(payload) = payload?;

    let praline = services::pralines::create_praline(
        &state.db,
        year,
        &payload.name,
        payload.description.as_deref(),
        payload.is_vegan,
        payload.image_path.as_deref(),
    )
    .await?;
    Ok(Json(praline))
}

/// PATCH /api/admin/pralines/:id
pub async fn update_praline(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    patch: Result<Json<PralinePatch>, JsonRejection>,
) -> ApiResult<Json<Praline>> {
    let Path(id) = id?;
    let Json(patch) = patch?;
    Ok(Json(services::pralines::update_praline(&state.db, id, &patch).await?))
}

/// DELETE /api/admin/pralines/:id
pub async fn delete_praline(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Praline>> {
    let Path(id) = id?;
    Ok(Json(services::delete_praline(&state.db, id).await?))
}

/// Build admin praline routes (mounted behind the admin gate)
pub fn admin_praline_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/years/:year/pralines",
            get(pralines_for_year).post(create_praline),
        )
        .route(
            "/api/admin/pralines/:id",
            patch(update_praline).delete(delete_praline),
        )
}
