//! Utility modules for pralinen-server

pub mod signature_retry;

pub use signature_retry::{check_signature_collision, MAX_SIGNATURE_ATTEMPTS};
