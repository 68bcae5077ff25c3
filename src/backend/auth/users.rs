/**
 * User Model and Record Store Interface
 *
 * This module defines the stored user record and the `UserStore` capability
 * trait every storage backend implements. The account service only ever
 * talks to `dyn UserStore`, so backends can be swapped without touching it.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User struct representing a stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID, assigned by the store
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// User email address (unique, login identifier)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Optional display name, never equal to the username
    pub display_name: Option<String>,
    /// Informational activity flag
    pub is_active: bool,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Record handed to `UserStore::create`; the password is already hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub is_active: bool,
}

/// Full replacement handed to `UserStore::update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub is_active: bool,
}

/// Errors reported by record store backends
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record matched the lookup key
    #[error("no user found for {identifier}")]
    NotFound { identifier: String },

    /// A uniqueness constraint rejected the write
    #[error("unique constraint violated on {field}: {value}")]
    UniqueViolation { field: String, value: String },

    /// Connection, query or decoding failure
    #[error("user store failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            identifier: identifier.to_string(),
        }
    }

    pub fn unique_violation(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

/// Record store capability consumed by the account service
///
/// Existence checks return `Ok(false)` on absence and only fail on genuine
/// I/O errors. Lookups signal absence with `StoreError::NotFound`, never with
/// a placeholder record.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All users, ordered by id
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    /// Fetch a user by id
    async fn get_by_id(&self, id: i64) -> Result<User, StoreError>;

    /// Fetch a user by email
    async fn get_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Persist a new user and return it with its assigned id
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Replace the stored fields of user `id`
    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, StoreError>;

    /// Remove user `id`
    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;
}
