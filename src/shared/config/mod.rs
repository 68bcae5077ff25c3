//! Service configuration module
//!
//! Provides the typed configuration the account service is built from.
//! Values come from the environment (optionally seeded from a `.env` file by
//! the binary) and are validated once, at startup. Nothing else in the crate
//! reads the environment.
//!
//! # Recognized variables
//!
//! - `JWT_SECRET` - HMAC signing secret for session tokens (required)
//! - `JWT_TTL_SECS` - session token lifetime in seconds (default 300)
//! - `BCRYPT_COST` - bcrypt work factor (default `bcrypt::DEFAULT_COST`)
//! - `DATABASE_URL` - PostgreSQL connection string (optional)
//! - `SERVER_PORT` - HTTP listen port (default 8080)

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Default session token lifetime.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(5 * 60);

/// Default HTTP listen port.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Service configuration
#[derive(Clone)]
pub struct ServiceConfig {
    /// Symmetric key used to sign and verify session tokens
    pub signing_secret: String,
    /// Lifetime of an issued session token
    pub token_ttl: Duration,
    /// bcrypt work factor for password hashing
    pub bcrypt_cost: u32,
    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// HTTP listen port
    pub server_port: u16,
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("signing_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl ServiceConfig {
    /// Create a new ServiceConfigBuilder
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// `from_env` is this function applied to `std::env::var`; tests pass a
    /// map instead so they never touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.signing_secret(secret);
        }
        if let Some(raw) = lookup("JWT_TTL_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue { key: "JWT_TTL_SECS", value: raw.clone() })?;
            builder = builder.token_ttl(Duration::from_secs(secs));
        }
        if let Some(raw) = lookup("BCRYPT_COST") {
            let cost = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue { key: "BCRYPT_COST", value: raw.clone() })?;
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            builder = builder.database_url(url);
        }
        if let Some(raw) = lookup("SERVER_PORT") {
            let port = raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "SERVER_PORT", value: raw.clone() })?;
            builder = builder.server_port(port);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.signing_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        // Tokens carry whole-second timestamps
        if self.token_ttl < Duration::from_secs(1) {
            return Err(ConfigError::InvalidValue {
                key: "JWT_TTL_SECS",
                value: format!("{:?}", self.token_ttl),
            });
        }
        Ok(())
    }
}

/// Builder for ServiceConfig
#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    signing_secret: Option<String>,
    token_ttl: Option<Duration>,
    bcrypt_cost: Option<u32>,
    database_url: Option<String>,
    server_port: Option<u16>,
}

impl ServiceConfigBuilder {
    /// Set the token signing secret
    pub fn signing_secret(mut self, secret: impl Into<String>) -> Self {
        self.signing_secret = Some(secret.into());
        self
    }

    /// Set the token lifetime
    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the HTTP listen port
    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ServiceConfig, ConfigError> {
        let config = ServiceConfig {
            signing_secret: self
                .signing_secret
                .ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
            token_ttl: self.token_ttl.unwrap_or(DEFAULT_TOKEN_TTL),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST),
            database_url: self.database_url,
            server_port: self.server_port.unwrap_or(DEFAULT_SERVER_PORT),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
