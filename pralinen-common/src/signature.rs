//! Rating signatures
//!
//! A signature is the six-character credential printed on a respondent's
//! card. It is drawn uniformly from `[a-z0-9]` and embeds nothing about the
//! person or year it belongs to. Uniqueness per year is the store's job
//! (`signature_year_unique`); callers regenerate on collision.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Number of characters in every signature
pub const SIGNATURE_LENGTH: usize = 6;

/// Symbols a signature is drawn from
pub const SIGNATURE_ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// A validated six-character signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Signature(String);

impl Signature {
    /// Check the shape of a caller-supplied signature.
    ///
    /// Only the length is checked; content is matched against the store.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.chars().count() != SIGNATURE_LENGTH {
            return Err(Error::InvalidSignature);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Signature {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Draw a fresh signature from the given entropy source.
pub fn generate_signature<R: Rng>(rng: &mut R) -> Signature {
    let value = (0..SIGNATURE_LENGTH)
        .map(|_| SIGNATURE_ALPHABET[rng.gen_range(0..SIGNATURE_ALPHABET.len())] as char)
        .collect();
    Signature(value)
}
