//! # Pralinen Common Library
//!
//! Shared code for the praline rating service:
//! - Database models and schema initialization
//! - Error taxonomy shared by every component
//! - Configuration loading and root folder resolution
//! - Signature generation and year-range rules
//! - Admin token hashing

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod signature;
pub mod time;
pub mod years;

pub use error::{Error, Result};
pub use signature::{generate_signature, Signature};
pub use years::validate_year;
