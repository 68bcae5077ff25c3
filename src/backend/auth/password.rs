/**
 * Password Hashing
 *
 * This module turns plaintext passwords into bcrypt digests and checks
 * candidate passwords against stored digests. A digest embeds its salt and
 * cost, so verification needs nothing but the digest itself.
 *
 * bcrypt only reads the first 72 bytes of its input (including a trailing
 * NUL). Longer passwords are rejected instead of silently truncated.
 */

use thiserror::Error;

/// Errors raised by the credential hasher
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    /// bcrypt refused to hash the input (cost out of range, password too long)
    #[error("password hashing failed: {0}")]
    Hashing(String),
    /// Stored digest is not a valid bcrypt hash
    #[error("malformed password digest: {0}")]
    Malformed(String),
}

/// bcrypt-backed password hasher
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt work factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Work factor used for new digests
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password
    ///
    /// # Returns
    /// A self-describing bcrypt digest (`$2b$<cost>$<salt+hash>`)
    pub fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        bcrypt::non_truncating_hash(plaintext, self.cost)
            .map_err(|e| HashError::Hashing(e.to_string()))
    }

    /// Check a plaintext password against a stored digest
    ///
    /// A mismatch is `Ok(false)`; only an unparsable digest is an error.
    /// A password too long to have been hashed never matches.
    pub fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, HashError> {
        match bcrypt::non_truncating_verify(plaintext, digest) {
            Ok(matched) => Ok(matched),
            Err(bcrypt::BcryptError::Truncation(_)) => Ok(false),
            Err(e) => Err(HashError::Malformed(e.to_string())),
        }
    }
}
