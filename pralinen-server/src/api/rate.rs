//! Public rating endpoints
//!
//! Addressed by signature only; no admin session involved.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use pralinen_common::db::{PersonYear, Rating};
use pralinen_common::Signature;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::{self, validation::stars_from_json, FeedbackUpdate, RatingAction, SessionView};
use crate::{ApiResult, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRatingRequest {
    pub praline_id: i64,
    /// Kept loose so non-integers surface as an invalid rating
    #[serde(default)]
    pub rating: Value,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitRatingResponse {
    pub success: bool,
    pub rating: Rating,
    pub action: RatingAction,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub success: bool,
    pub person_year: PersonYear,
}

/// GET /api/rate/:signature
pub async fn get_session(
    State(state): State<AppState>,
    Path(signature): Path<String>,
) -> ApiResult<Json<SessionView>> {
    Ok(Json(services::resolve_session(&state.db, &signature).await?))
}

/// PATCH /api/rate/:signature
pub async fn update_feedback(
    State(state): State<AppState>,
    Path(signature): Path<String>,
    update: Result<Json<FeedbackUpdate>, JsonRejection>,
) -> ApiResult<Json<FeedbackResponse>> {
    Signature::parse(&signature)?;
    let Json(update) = update?;

    let person_year = services::update_feedback(&state.db, &signature, &update).await?;
    Ok(Json(FeedbackResponse {
        success: true,
        person_year,
    }))
}

/// POST /api/rate/:signature/ratings
pub async fn submit_rating(
    State(state): State<AppState>,
    Path(signature): Path<String>,
    payload: Result<Json<SubmitRatingRequest>, JsonRejection>,
) -> ApiResult<Json<SubmitRatingResponse>> {
    // signature shape is checked before the body and the rating value
    Signature::parse(&signature)?;
    let Json(payload) = payload?;
    let stars = stars_from_json(&payload.rating)?;

    let upsert = services::submit_rating(
        &state.db,
        &signature,
        payload.praline_id,
        stars,
        payload.comment.as_deref(),
    )
    .await?;

    Ok(Json(SubmitRatingResponse {
        success: true,
        rating: upsert.rating,
        action: upsert.action,
    }))
}

/// Build public rating routes
pub fn rate_routes() -> Router<AppState> {
    Router::new()
        .route("/api/rate/:signature", get(get_session).patch(update_feedback))
        .route("/api/rate/:signature/ratings", post(submit_rating))
}
