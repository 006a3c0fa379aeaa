//! Admin person endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, patch},
    Json, Router,
};
use pralinen_common::db::{Person, PersonWithYear};
use rand::{rngs::StdRng, SeedableRng};
use serde::Deserialize;

use super::params::{id_param, year_param};
use crate::services::{self, ParticipationOutcome, PersonPatch};
use crate::{ApiResult, AppState};

/// Name payload for person creation and enrollment
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonNameRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationRequest {
    pub is_participating: bool,
}

/// GET /api/admin/persons
pub async fn list_persons(State(state): State<AppState>) -> ApiResult<Json<Vec<Person>>> {
    Ok(Json(services::persons::list_persons(&state.db).await?))
}

/// POST /api/admin/persons
pub async fn create_person(
    State(state): State<AppState>,
    payload: Result<Json<PersonNameRequest>, JsonRejection>,
) -> ApiResult<Json<Person>> {
    let Json(payload) = payload?;
    let person =
        services::persons::create_person(&state.db, &payload.first_name, &payload.last_name)
            .await?;
    Ok(Json(person))
}

/// PATCH /api/admin/persons/:id
pub async fn update_person(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    patch: Result<Json<PersonPatch>, JsonRejection>,
) -> ApiResult<Json<Person>> {
    let Path(id) = id?;
    let Json(patch) = patch?;
    Ok(Json(services::persons::update_person(&state.db, id, &patch).await?))
}

/// DELETE /api/admin/persons/:id
pub async fn delete_person(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Person>> {
    let Path(id) = id?;
    Ok(Json(services::delete_person(&state.db, id).await?))
}

/// GET /api/admin/years/:year/persons
pub async fn persons_for_year(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> ApiResult<Json<Vec<PersonWithYear>>> {
    let year = year_param(&year)?;
    Ok(Json(services::persons::persons_for_year(&state.db, year).await?))
}

/// POST /api/admin/years/:year/persons
///
/// Enrollment: creates the person and their PersonYear together.
pub async fn enroll_person(
    State(state): State<AppState>,
    Path(year): Path<String>,
    payload: Result<Json<PersonNameRequest>, JsonRejection>,
) -> ApiResult<Json<PersonWithYear>> {
    let year = year_param(&year)?;
    let Json(payload) = payload?;

    let mut rng = StdRng::from_entropy();
    let enrolled = services::enroll_person(
        &state.db,
        &mut rng,
        year,
        &payload.first_name,
        &payload.last_name,
    )
    .await?;
    Ok(Json(enrolled))
}

/// PATCH /api/admin/years/:year/persons/:id/participation
pub async fn set_participation(
    State(state): State<AppState>,
    Path((year, id)): Path<(String, String)>,
    payload: Result<Json<ParticipationRequest>, JsonRejection>,
) -> ApiResult<Json<ParticipationOutcome>> {
    let year = year_param(&year)?;
    let id = id_param(&id, "person")?;
    let Json(payload) = payload?;

    let mut rng = StdRng::from_entropy();
    let outcome =
        services::set_participation(&state.db, &mut rng, id, year, payload.is_participating)
            .await?;
    Ok(Json(outcome))
}

/// Build admin person routes (mounted behind the admin gate)
pub fn admin_person_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/persons", get(list_persons).post(create_person))
        .route(
            "/api/admin/persons/:id",
            patch(update_person).delete(delete_person),
        )
        .route(
            "/api/admin/years/:year/persons",
            get(persons_for_year).post(enroll_person),
        )
        .route(
            "/api/admin/years/:year/persons/:id/participation",
            patch(set_participation),
        )
}
