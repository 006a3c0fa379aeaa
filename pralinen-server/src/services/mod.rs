//! Core components
//!
//! Each service validates its input completely before touching the store,
//! takes timestamps from the server clock, and runs multi-step writes in a
//! single transaction.

pub mod deletion;
pub mod enrollment;
pub mod participation;
pub mod patch;
pub mod persons;
pub mod pralines;
pub mod rating_session;
pub mod rating_upsert;
pub mod validation;
pub mod year_catalog;

pub use deletion::{delete_person, delete_praline};
pub use enrollment::enroll_person;
pub use participation::{set_participation, ParticipationOutcome};
pub use patch::{PersonPatch, PralinePatch};
pub use rating_session::{resolve_session, Progress, SessionView};
pub use rating_upsert::{submit_rating, update_feedback, FeedbackUpdate, RatingAction, RatingUpsert};
pub use year_catalog::{available_years, AvailableYears};
