//! Path parameter parsing
//!
//! Year and id segments arrive as plain strings so the year range check can
//! run before any other extractor has a chance to reject the request.

use axum::http::StatusCode;
use pralinen_common::validate_year;

use crate::{ApiError, ApiResult};

/// Parse and range-check a `:year` segment
pub fn year_param(raw: &str) -> ApiResult<i64> {
    let year: i64 = raw
        .parse()
        .map_err(|_| ApiError::InvalidYearParam(raw.to_string()))?;
    validate_year(year)?;
    Ok(year)
}

/// Parse an integer `:id` segment
pub fn id_param(raw: &str, entity: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::Rejected {
        status: StatusCode::BAD_REQUEST,
        message: format!("Invalid {} id {}", entity, raw),
    })
}
