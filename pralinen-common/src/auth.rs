//! Admin token hashing
//!
//! The service never stores an admin token, only its SHA-256 digest as 64
//! lowercase hex characters. These are pure functions; the HTTP gate lives in
//! the server crate.

use sha2::{Digest, Sha256};

/// SHA-256 of a token as lowercase hex
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Compare a presented token against a stored digest.
///
/// Comparison runs over the full digest regardless of where the first
/// mismatch occurs.
pub fn verify_token(presented: &str, expected_hash: &str) -> bool {
    let calculated = hash_token(presented);
    let expected = expected_hash.trim().to_ascii_lowercase();
    if calculated.len() != expected.len() {
        return false;
    }
    calculated
        .bytes()
        .zip(expected.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
