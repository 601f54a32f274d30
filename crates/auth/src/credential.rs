//! Password hashing and verification (bcrypt).
//!
//! Every hash draws a fresh random salt, so hashing the same password twice
//! never yields the same digest. Verification compares in constant time.
//!
//! bcrypt only reads the first 72 bytes of its input. Plaintexts are first
//! reduced to a base64 SHA-256 digest (44 bytes) so every byte of the
//! password counts.

use base64::{Engine as _, engine::general_purpose};
use sha2::{Digest, Sha256};
use thiserror::Error;

use warden_core::CredentialDigest;

/// Plaintext behind the decoy digest.
const DECOY_PLAINTEXT: &str = "warden-decoy-credential";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The stored digest is structurally corrupt.
    #[error("malformed digest: {0}")]
    Format(String),

    /// The hashing primitive itself failed.
    #[error("hashing failed: {0}")]
    Encoding(String),
}

/// Salted, deliberately expensive one-way password codec.
pub struct CredentialCodec {
    cost: u32,
    decoy: CredentialDigest,
}

impl CredentialCodec {
    pub const MIN_COST: u32 = 4;
    pub const MAX_COST: u32 = 31;

    /// Build a codec with the given bcrypt work factor.
    ///
    /// Also pre-computes the decoy digest used by [`Self::verify_decoy`].
    pub fn new(cost: u32) -> Result<Self, CredentialError> {
        if !(Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            return Err(CredentialError::Encoding(format!(
                "bcrypt cost {cost} outside {}..={}",
                Self::MIN_COST,
                Self::MAX_COST
            )));
        }

        let decoy = hash_with_cost(DECOY_PLAINTEXT, cost)?;
        Ok(Self { cost, decoy })
    }

    /// Hash a plaintext password. No input is rejected.
    pub fn hash(&self, plaintext: &str) -> Result<CredentialDigest, CredentialError> {
        hash_with_cost(plaintext, self.cost)
    }

    /// `Ok(false)` on mismatch; `Err(Format)` only when `digest` cannot be parsed.
    pub fn verify(
        &self,
        plaintext: &str,
        digest: &CredentialDigest,
    ) -> Result<bool, CredentialError> {
        bcrypt::verify(prehash(plaintext), digest.as_str())
            .map_err(|e| CredentialError::Format(e.to_string()))
    }

    /// Spend the same work as a real verification, discarding the result.
    ///
    /// Used when there is no stored digest to check against so that a missing
    /// account costs the same time as a wrong password.
    pub fn verify_decoy(&self, plaintext: &str) {
        let _ = self.verify(plaintext, &self.decoy);
    }
}

impl core::fmt::Debug for CredentialCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CredentialCodec")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}

fn prehash(plaintext: &str) -> String {
    general_purpose::STANDARD.encode(Sha256::digest(plaintext.as_bytes()))
}

fn hash_with_cost(plaintext: &str, cost: u32) -> Result<CredentialDigest, CredentialError> {
    bcrypt::hash(prehash(plaintext), cost)
        .map(CredentialDigest::new)
        .map_err(|e| CredentialError::Encoding(e.to_string()))
}
