//! HTTP error mapping for pralinen-server

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pralinen_common::Error;
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Domain or store error from a core component
    #[error(transparent)]
    Domain(#[from] Error),

    /// Year path segment that is not an integer
    #[error("Invalid year {0}: must be between 2021 and 2050")]
    InvalidYearParam(String),

    /// Path or body the extractors could not decode
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    /// Status and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Domain(err) => match err {
                Error::InvalidRange { .. } => (StatusCode::BAD_REQUEST, "INVALID_RANGE"),
                Error::InvalidSignature => (StatusCode::BAD_REQUEST, "INVALID_SIGNATURE"),
                Error::InvalidRating { .. } => (StatusCode::BAD_REQUEST, "INVALID_RATING"),
                Error::InvalidField { .. } => (StatusCode::BAD_REQUEST, "INVALID_FIELD"),
                Error::PralineYearMismatch { .. } => {
                    (StatusCode::BAD_REQUEST, "PRALINE_YEAR_MISMATCH")
                }
                Error::FavoriteYearMismatch { .. } => {
                    (StatusCode::BAD_REQUEST, "FAVORITE_YEAR_MISMATCH")
                }
                Error::ReferencedByRatings { .. } => {
                    (StatusCode::BAD_REQUEST, "REFERENCED_BY_RATINGS")
                }
                Error::ReferencedAsFavorite { .. } => {
                    (StatusCode::BAD_REQUEST, "REFERENCED_AS_FAVORITE")
                }
                Error::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                Error::ConflictUnique(_) => (StatusCode::CONFLICT, "CONFLICT_UNIQUE"),
                Error::ReferenceViolation(_) => (StatusCode::CONFLICT, "REFERENCE_VIOLATION"),
                Error::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
                Error::StoreUnavailable(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE")
                }
                Error::Io(_) | Error::Config(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                }
            },
            ApiError::InvalidYearParam(_) => (StatusCode::BAD_REQUEST, "INVALID_RANGE"),
            ApiError::Rejected { status, .. } => (*status, "INVALID_REQUEST"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let message = match &self {
            // driver details stay in the log
            ApiError::Domain(Error::StoreUnavailable(_)) => "Store unavailable".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
