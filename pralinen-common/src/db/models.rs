//! Database models
//!
//! Rows map one-to-one onto the four entity tables. Field names serialize as
//! camelCase for the HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person, independent of any participation year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A praline in exactly one year's catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Praline {
    pub id: i64,
    pub year: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_vegan: bool,
    /// Opaque reference into asset storage
    pub image_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A person's participation record for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PersonYear {
    pub id: i64,
    pub person_id: i64,
    pub year: i32,
    pub signature: String,
    pub is_participating: bool,
    pub favorite_chocolate_id: Option<i64>,
    pub general_feedback: Option<String>,
    pub allergies: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One respondent's score for one praline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: i64,
    pub person_year_id: i64,
    pub praline_id: i64,
    pub rating: i64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Person enriched with its (possibly absent) PersonYear for a given year
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonWithYear {
    #[serde(flatten)]
    pub person: Person,
    pub person_year: Option<PersonYear>,
    pub has_person_year: bool,
}

impl PersonWithYear {
    pub fn new(person: Person, person_year: Option<PersonYear>) -> Self {
        Self {
            has_person_year: person_year.is_some(),
            person,
            person_year,
        }
    }
}
