/**
 * Session Tokens
 *
 * This module issues and verifies the signed, time-bounded JWTs that callers
 * present as bearer credentials. Tokens are signed with HS512 using the
 * configured secret; the secret and lifetime are injected at construction.
 *
 * Expiry is checked strictly (`now < exp`) with no clock-skew leeway.
 */

use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::ServiceConfig;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Verified caller identity derived from token claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub email: String,
}

impl Claims {
    /// Convert verified claims into the caller identity
    pub fn identity(&self) -> Result<Identity, TokenError> {
        let user_id = self
            .sub
            .parse::<i64>()
            .ok()
            .filter(|id| *id >= 0)
            .ok_or_else(|| TokenError::Invalid(format!("invalid subject: {}", self.sub)))?;
        Ok(Identity {
            user_id,
            email: self.email.clone(),
        })
    }
}

/// Token issuance and verification errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(String),
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("token expired")]
    Expired,
}

/// Issues and verifies session tokens with one symmetric key
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    const ALGORITHM: Algorithm = Algorithm::HS512;

    /// Create an issuer for the given secret and token lifetime
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        // Expiry is compared against our own clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    /// Create an issuer from the service configuration
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(&config.signing_secret, config.token_ttl)
    }

    /// Lifetime of issued tokens
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Create a token for a user, issued now
    pub fn issue(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, email, now())
    }

    /// Create a token for a user as if issued at `issued_at` (Unix seconds)
    pub fn issue_at(&self, user_id: i64, email: &str, issued_at: i64) -> Result<String, TokenError> {
        let ttl_secs = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_secs),
        };

        encode(&Header::new(Self::ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify and decode a token against the current time
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, now())
    }

    /// Verify and decode a token against `now` (Unix seconds)
    ///
    /// Fails for malformed tokens, signature mismatches and `now >= exp`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        let claims = token_data.claims;
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
