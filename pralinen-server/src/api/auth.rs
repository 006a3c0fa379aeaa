//! Admin authentication gate
//!
//! Identity is delegated: the core only asks "is this request from an
//! authenticated admin?". The shipped gate checks a bearer token against a
//! configured SHA-256 digest. Failing requests never reach a handler and get
//! 401, distinct from every business-rule error.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use pralinen_common::auth::verify_token;
use pralinen_common::Error;
use tracing::warn;

use crate::{ApiError, AppState};

/// Decides whether a request carries admin credentials
pub trait AdminGate: Send + Sync {
    fn is_admin(&self, headers: &HeaderMap) -> bool;
}

/// `Authorization: Bearer <token>` checked against a stored digest.
///
/// Without a digest the gate is open (local development).
#[derive(Debug, Clone)]
pub struct BearerTokenGate {
    token_sha256: Option<String>,
}

impl BearerTokenGate {
    pub fn new(token_sha256: Option<String>) -> Self {
        Self {
            token_sha256: token_sha256.filter(|h| !h.trim().is_empty()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.token_sha256.is_none()
    }
}

impl AdminGate for BearerTokenGate {
    fn is_admin(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.token_sha256 else {
            return true;
        };

        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| verify_token(token.trim(), expected))
            .unwrap_or(false)
    }
}

/// Middleware guarding every admin route
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.admin_gate.is_admin(request.headers()) {
        warn!(path = %request.uri().path(), "Rejected unauthenticated admin request");
        return Err(Error::Unauthorized("admin session required".to_string()).into());
    }

    Ok(next.run(request).await)
}
