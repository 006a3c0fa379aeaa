//! Field validation shared by the services

use pralinen_common::{Error, Result};
use serde_json::Value;

/// Name fields (person first/last name, praline name)
pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const MAX_COMMENT_CHARS: usize = 500;
pub const MAX_FEEDBACK_CHARS: usize = 1000;
pub const MAX_ALLERGIES_CHARS: usize = 500;

/// Trimmed, non-empty text of at most `max_chars` characters
pub fn required_text(field: &'static str, value: &str, max_chars: usize) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_field(field, "must not be empty"));
    }
    check_length(field, trimmed, max_chars)?;
    Ok(trimmed.to_string())
}

/// Trimmed optional text; empty or whitespace-only becomes absent
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => {
            check_length(field, trimmed, max_chars)?;
            Ok(Some(trimmed.to_string()))
        }
    }
}

fn check_length(field: &'static str, value: &str, max_chars: usize) -> Result<()> {
    if value.chars().count() > max_chars {
        return Err(Error::invalid_field(
            field,
            format!("must be at most {} characters", max_chars),
        ));
    }
    Ok(())
}

/// Star ratings must be integers in [1, 5]
pub fn check_stars(value: i64) -> Result<i64> {
    if !(1..=5).contains(&value) {
        return Err(Error::InvalidRating {
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// Interpret a JSON rating value.
///
/// Accepts integral numbers only (`4` or `4.0`); strings, fractions and
/// out-of-range values are `InvalidRating`.
pub fn stars_from_json(value: &Value) -> Result<i64> {
    let invalid = || Error::InvalidRating {
        value: value.to_string(),
    };

    let stars = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => {
                let f = n.as_f64().ok_or_else(invalid)?;
                if f.fract() != 0.0 || !(1.0..=5.0).contains(&f) {
                    return Err(invalid());
                }
                f as i64
            }
        },
        _ => return Err(invalid()),
    };

    check_stars(stars)
}
