//! Common error types for the praline rating service

use thiserror::Error;

/// Common result type for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the entity store and every core component.
///
/// Validation variants are produced before any store mutation. Store-level
/// failures arrive through the `From<sqlx::Error>` conversion below so raw
/// driver errors never leak to callers.
#[derive(Error, Debug)]
pub enum Error {
    /// Year outside the accepted range (2020, 2050]
    #[error("Invalid year {year}: must be between 2021 and 2050")]
    InvalidRange { year: i64 },

    /// Signature absent or not exactly six characters
    #[error("Invalid signature: must be exactly 6 characters")]
    InvalidSignature,

    /// Rating not an integer in [1, 5]
    #[error("Invalid rating {value}: must be an integer between 1 and 5")]
    InvalidRating { value: String },

    /// A request field failed a length or presence constraint
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Referenced person, person-year, or praline does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rated praline does not belong to the respondent's year
    #[error("Praline {praline_id} not found or not part of year {year}")]
    PralineYearMismatch { praline_id: i64, year: i32 },

    /// Favorite praline does not belong to the respondent's year
    #[error("Favorite praline {praline_id} not found or not part of year {year}")]
    FavoriteYearMismatch { praline_id: i64, year: i32 },

    /// Deletion refused: ratings still reference the record
    #[error("Cannot delete {entity} {id}: referenced by {count} rating(s)")]
    ReferencedByRatings {
        entity: &'static str,
        id: i64,
        count: i64,
    },

    /// Deletion refused: person-years still name the praline as favorite
    #[error("Cannot delete praline {id}: marked as favorite by {count} participant(s)")]
    ReferencedAsFavorite { id: i64, count: i64 },

    /// Store uniqueness constraint violated
    #[error("Conflict: {0}")]
    ConflictUnique(String),

    /// Store foreign-key constraint refused the write
    #[error("Reference violation: {0}")]
    ReferenceViolation(String),

    /// Caller is not an authenticated admin
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Underlying transaction or connection failure
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),

    /// I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for a field validation failure
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("record".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                Error::ConflictUnique(db_err.message().to_string())
            }
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                Error::ReferenceViolation(db_err.message().to_string())
            }
            other => Error::StoreUnavailable(other),
        }
    }
}

/// True when a store error is a uniqueness violation on the given column.
///
/// SQLite reports the offending columns as `table.column` in the message,
/// e.g. `UNIQUE constraint failed: person_years.signature, person_years.year`.
pub fn is_unique_violation_on(err: &sqlx::Error, qualified_column: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.message().contains(qualified_column)
        }
        _ => false,
    }
}
