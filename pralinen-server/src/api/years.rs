//! Year catalog endpoints

use axum::{extract::State, routing::get, Json, Router};

use crate::services::{self, AvailableYears};
use crate::{ApiResult, AppState};

/// GET /api/years/available
pub async fn available_years(State(state): State<AppState>) -> ApiResult<Json<AvailableYears>> {
    Ok(Json(services::available_years(&state.db).await?))
}

/// GET /api/admin/years/available
///
/// Admin variant: the year list alone.
pub async fn admin_available_years(State(state): State<AppState>) -> ApiResult<Json<Vec<i32>>> {
    Ok(Json(services::available_years(&state.db).await?.years))
}

pub fn public_year_routes() -> Router<AppState> {
    Router::new().route("/api/years/available", get(available_years))
}

pub fn admin_year_routes() -> Router<AppState> {
    Router::new().route("/api/admin/years/available", get(admin_available_years))
}
