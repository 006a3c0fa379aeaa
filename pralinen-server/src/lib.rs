//! pralinen-server library
//!
//! Praline rating service: admin management of persons, yearly praline
//! catalogs and participation, plus the anonymous signature-based rating
//! flow.

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod services;
pub mod utils;

pub use crate::error::{ApiError, ApiResult};
use crate::api::AdminGate;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Decides which requests may use admin routes
    pub admin_gate: Arc<dyn AdminGate>,
}

impl AppState {
    pub fn new(db: SqlitePool, admin_gate: Arc<dyn AdminGate>) -> Self {
        Self { db, admin_gate }
    }
}

/// Build application router
///
/// Health, year catalog and rating routes are public; everything under
/// `/api/admin` passes the admin gate first.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;

    let admin = Router::new()
        .merge(api::admin_person_routes())
        .merge(api::admin_praline_routes())
        .merge(api::admin_year_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::admin_auth_middleware,
        ));

    let public = Router::new()
        .merge(api::health_routes())
        .merge(api::public_year_routes())
        .merge(api::rate_routes());

    Router::new()
        .merge(admin)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
