/**
 * Account Error Types
 *
 * This module defines the error taxonomy returned by the account service.
 * Every failure the service can produce is exactly one of these kinds, so the
 * HTTP layer chooses a status code by matching on the variant, never by
 * inspecting message text.
 *
 * # Status Code Mapping
 *
 * - `Validation` - 400 Bad Request
 * - `NotFound` - 404 Not Found
 * - `Duplicate` - 409 Conflict
 * - `InvalidCredentials` / `InvalidToken` - 401 Unauthorized
 * - `Unknown` - 500 Internal Server Error
 */

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::password::HashError;
use crate::backend::auth::users::StoreError;

/// Account service error taxonomy
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Input failed a field validation rule
    #[error("validation failed for field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// The addressed record does not exist
    #[error("{resource} not found: {identifier}")]
    NotFound {
        /// Key the lookup used (id or email)
        identifier: String,
        /// Kind of record that was looked up
        resource: String,
    },

    /// A unique field is already taken by another record
    #[error("{resource} already exists: {value}")]
    Duplicate {
        /// The unique field (`email` or `username`)
        resource: String,
        /// The conflicting value
        value: String,
    },

    /// Password did not match the stored digest
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Session token was malformed, forged or expired
    #[error("invalid or expired token")]
    InvalidToken,

    /// Collaborator failure that fits no other kind
    #[error("unknown error: {cause}")]
    Unknown {
        /// Internal cause, logged but never sent to callers
        cause: String,
    },
}

impl AccountError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(identifier: impl ToString, resource: impl Into<String>) -> Self {
        Self::NotFound {
            identifier: identifier.to_string(),
            resource: resource.into(),
        }
    }

    /// Create a duplicate error
    pub fn duplicate(resource: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Duplicate {
            resource: resource.into(),
            value: value.into(),
        }
    }

    /// Create an unknown error
    pub fn unknown(cause: impl Into<String>) -> Self {
        Self::Unknown {
            cause: cause.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Duplicate { .. } => StatusCode::CONFLICT,
            Self::InvalidCredentials | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Unknown { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the caller-facing error message
    ///
    /// `Unknown` never exposes its cause.
    pub fn message(&self) -> String {
        match self {
            Self::Unknown { .. } => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { identifier } => Self::not_found(identifier, "user"),
            StoreError::UniqueViolation { field, value } => Self::duplicate(field, value),
            StoreError::Backend { message } => Self::unknown(message),
        }
    }
}

impl From<HashError> for AccountError {
    fn from(err: HashError) -> Self {
        Self::unknown(err.to_string())
    }
}

impl From<JsonRejection> for AccountError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation("body", rejection.body_text())
    }
}

impl From<PathRejection> for AccountError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation("id", rejection.body_text())
    }
}
