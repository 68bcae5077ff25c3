/**
 * Account Service
 *
 * The policy core of the crate. Every account operation runs through here:
 * field validation, duplicate detection, password hashing, persistence and
 * token issuance. The service holds no state of its own between calls; all
 * durable state lives behind the `UserStore` trait.
 *
 * # Uniqueness
 *
 * Duplicate checks (`exists_by_email` / `exists_by_username`) run before each
 * write, but they are not atomic with the write itself. Two concurrent
 * registrations can both pass the check; the store's uniqueness constraint
 * rejects the loser, and that rejection is reported as `Duplicate` too.
 *
 * # Password changes
 *
 * `update_account` accepts an optional new password. When present it is
 * validated and hashed exactly like at creation; when absent the stored
 * digest is kept.
 */

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::{Identity, TokenIssuer};
use crate::backend::auth::users::{NewUser, User, UserChanges, UserStore};
use crate::backend::error::AccountError;
use crate::shared::ServiceConfig;

fn default_active() -> bool {
    true
}

/// Candidate record submitted for account creation
#[derive(Clone, Deserialize)]
pub struct NewAccount {
    /// Client-supplied id; only checked for sign, the store assigns the real id
    #[serde(default)]
    pub id: Option<i64>,
    pub username: String,
    pub email: String,
    /// Plaintext password, hashed before it reaches the store
    pub password: String,
    #[serde(default, alias = "name")]
    pub display_name: Option<String>,
    #[serde(default = "default_active", alias = "isactive")]
    pub is_active: bool,
}

impl NewAccount {
    pub fn new(username: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            password: password.into(),
            display_name: None,
            is_active: true,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    fn fields(&self) -> AccountFields<'_> {
        AccountFields {
            id: self.id,
            username: &self.username,
            display_name: self.display_name.as_deref(),
            email: &self.email,
            password: Some(&self.password),
        }
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// Full replacement of an account's editable fields
#[derive(Clone, Deserialize)]
pub struct AccountUpdate {
    pub username: String,
    pub email: String,
    #[serde(default, alias = "name")]
    pub display_name: Option<String>,
    #[serde(default = "default_active", alias = "isactive")]
    pub is_active: bool,
    /// New plaintext password; `None` keeps the current one
    #[serde(default)]
    pub password: Option<String>,
}

impl AccountUpdate {
    /// Update that rewrites every field of `user` to its current value
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            is_active: user.is_active,
            password: None,
        }
    }

    fn fields(&self) -> AccountFields<'_> {
        AccountFields {
            id: None,
            username: &self.username,
            display_name: self.display_name.as_deref(),
            email: &self.email,
            password: self.password.as_deref(),
        }
    }
}

impl fmt::Debug for AccountUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountUpdate")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("is_active", &self.is_active)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Borrowed view of the fields the validation rules look at
#[derive(Debug, Clone, Copy)]
pub struct AccountFields<'a> {
    pub id: Option<i64>,
    pub username: &'a str,
    pub display_name: Option<&'a str>,
    pub email: &'a str,
    /// `None` skips the password rule (updates that keep the password)
    pub password: Option<&'a str>,
}

/// Apply the account field rules, failing on the first invalid field
///
/// The display name comparison is case-sensitive after trimming both sides.
pub fn validate(fields: AccountFields<'_>) -> Result<(), AccountError> {
    if matches!(fields.id, Some(id) if id < 0) {
        return Err(AccountError::validation("id", "id cannot be negative"));
    }

    let username = fields.username.trim();
    if username.is_empty() {
        return Err(AccountError::validation("username", "username can't be empty"));
    }

    if fields.display_name.unwrap_or_default().trim() == username {
        return Err(AccountError::validation(
            "display_name",
            "display name can't be the same as username",
        ));
    }

    if fields.email.trim().is_empty() {
        return Err(AccountError::validation("email", "email can't be empty"));
    }

    if fields.password == Some("") {
        return Err(AccountError::validation("password", "password can't be empty"));
    }

    Ok(())
}

fn ensure_valid_id(id: i64) -> Result<(), AccountError> {
    if id < 0 {
        return Err(AccountError::validation("id", "id cannot be negative"));
    }
    Ok(())
}

/// Account management service
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl AccountService {
    /// Build the service over `store` from the service configuration
    pub fn new(store: Arc<dyn UserStore>, config: &ServiceConfig) -> Self {
        Self::with_parts(
            store,
            PasswordHasher::new(config.bcrypt_cost),
            TokenIssuer::from_config(config),
        )
    }

    /// Build the service from explicit collaborators
    pub fn with_parts(store: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self { store, hasher, tokens }
    }

    /// Token issuer used for `authenticate` and `authorize`
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Validate, de-duplicate, hash and persist a new account
    pub async fn create_account(&self, candidate: NewAccount) -> Result<User, AccountError> {
        if let Err(err) = validate(candidate.fields()) {
            tracing::warn!("User validation failed for {}: {}", candidate.email, err);
            return Err(err);
        }

        if self.store.exists_by_email(&candidate.email).await? {
            tracing::warn!("Email already exists: {}", candidate.email);
            return Err(AccountError::duplicate("email", candidate.email));
        }

        if self.store.exists_by_username(&candidate.username).await? {
            tracing::warn!("Username already exists: {}", candidate.username);
            return Err(AccountError::duplicate("username", candidate.username));
        }

        let password_hash = self.hasher.hash(&candidate.password).map_err(|e| {
            tracing::error!("Password hashing failed for {}: {}", candidate.email, e);
            AccountError::from(e)
        })?;

        let user = self
            .store
            .create(NewUser {
                username: candidate.username,
                email: candidate.email,
                password_hash,
                display_name: candidate.display_name,
                is_active: candidate.is_active,
            })
            .await?;

        tracing::info!("User created successfully: {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Fetch one account by id
    pub async fn get_account(&self, id: i64) -> Result<User, AccountError> {
        ensure_valid_id(id)?;
        Ok(self.store.get_by_id(id).await?)
    }

    /// Fetch all accounts
    pub async fn list_accounts(&self) -> Result<Vec<User>, AccountError> {
        self.store.list_all().await.map_err(|e| {
            tracing::error!("Failed to list users: {}", e);
            AccountError::unknown(e.to_string())
        })
    }

    /// Replace an account's fields, re-checking uniqueness of changed keys
    pub async fn update_account(&self, id: i64, update: AccountUpdate) -> Result<User, AccountError> {
        ensure_valid_id(id)?;
        if let Err(err) = validate(update.fields()) {
            tracing::warn!("Update validation failed for user {}: {}", id, err);
            return Err(err);
        }

        let existing = self.store.get_by_id(id).await?;

        if update.username != existing.username
            && self.store.exists_by_username(&update.username).await?
        {
            tracing::warn!("Username already exists: {}", update.username);
            return Err(AccountError::duplicate("username", update.username));
        }

        if update.email != existing.email && self.store.exists_by_email(&update.email).await? {
            tracing::warn!("Email already exists: {}", update.email);
            return Err(AccountError::duplicate("email", update.email));
        }

        let password_hash = match update.password.as_deref() {
            Some(plaintext) => self.hasher.hash(plaintext)?,
            None => existing.password_hash,
        };

        let user = self
            .store
            .update(
                id,
                UserChanges {
                    username: update.username,
                    email: update.email,
                    password_hash,
                    display_name: update.display_name,
                    is_active: update.is_active,
                },
            )
            .await?;

        tracing::info!("User updated successfully: {}", id);
        Ok(user)
    }

    /// Delete an account; deleting a missing id is `NotFound`
    pub async fn delete_account(&self, id: i64) -> Result<(), AccountError> {
        ensure_valid_id(id)?;
        self.store.delete(id).await?;
        tracing::info!("User deleted successfully: {}", id);
        Ok(())
    }

    /// Check an email/password pair and issue a session token
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String, AccountError> {
        let user = self.store.get_by_email(email).await.map_err(|e| {
            tracing::warn!("Password check failed (user lookup) for {}: {}", email, e);
            AccountError::from(e)
        })?;

        if !self.hasher.verify(password, &user.password_hash)? {
            tracing::warn!("Invalid password for user: {}", email);
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, &user.email).map_err(|e| {
            tracing::error!("Token generation failed: {}", e);
            AccountError::unknown(e.to_string())
        })?;

        tracing::info!("User logged in successfully: {} ({})", user.username, user.email);
        Ok(token)
    }

    /// Check a token's signature and expiry and return its identity
    pub fn verify_token(&self, token: &str) -> Result<Identity, AccountError> {
        self.tokens
            .verify(token)
            .and_then(|claims| claims.identity())
            .map_err(|e| {
                tracing::warn!("Invalid token: {}", e);
                AccountError::InvalidToken
            })
    }

    /// Verify a bearer token and resolve it to a live account identity
    ///
    /// A token whose subject no longer exists in the store is rejected.
    pub async fn authorize(&self, token: &str) -> Result<Identity, AccountError> {
        let identity = self.verify_token(token)?;

        if !self.store.exists_by_id(identity.user_id).await? {
            tracing::warn!("Token subject no longer exists: {}", identity.user_id);
            return Err(AccountError::InvalidToken);
        }

        Ok(identity)
    }
}
