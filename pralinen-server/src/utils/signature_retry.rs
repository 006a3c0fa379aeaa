//! Signature collision retry
//!
//! The store's `signature_year_unique` constraint is the authority on
//! signature uniqueness. Callers generate a signature, attempt the insert,
//! and hand any failure to [`check_signature_collision`], which decides
//! whether another attempt with a fresh signature is allowed.
//!
//! This is the only automatic retry in the service.

use pralinen_common::error::is_unique_violation_on;
use pralinen_common::{Error, Result};

/// Attempts before a collision is reported as a conflict
pub const MAX_SIGNATURE_ATTEMPTS: u32 = 5;

/// Classify a failed PersonYear insert.
///
/// Returns `Ok(())` when the failure was a signature collision and attempts
/// remain; the caller should loop with a new signature. Every other
/// failure, and a collision on the last attempt, is returned as the domain
/// error.
pub fn check_signature_collision(
    operation_name: &str,
    attempt: u32,
    err: sqlx::Error,
) -> Result<()> {
    if !is_unique_violation_on(&err, "person_years.signature") {
        return Err(err.into());
    }

    if attempt >= MAX_SIGNATURE_ATTEMPTS {
        tracing::error!(
            operation = operation_name,
            attempt,
            "Signature collision persisted, giving up"
        );
        return Err(Error::ConflictUnique(format!(
            "could not allocate a unique signature after {} attempts",
            attempt
        )));
    }

    tracing::warn!(
        operation = operation_name,
        attempt,
        "Signature collision, retrying with a fresh signature"
    );
    Ok(())
}
