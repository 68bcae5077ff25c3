//! Authentication Module
//!
//! This module holds the account core: password hashing, session tokens,
//! the user record store interface with its backends, the account service,
//! and the HTTP handlers in front of it.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - bcrypt password hashing
//! ├── sessions.rs     - JWT issuance and verification
//! ├── users.rs        - User model and UserStore trait
//! ├── memory.rs       - In-memory UserStore
//! ├── postgres.rs     - PostgreSQL UserStore
//! ├── service.rs      - AccountService (validation and policy)
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Create**: candidate validated → duplicates checked → password hashed → stored
//! 2. **Login**: email looked up → password verified → session token returned
//! 3. **Protected calls**: bearer token verified → identity passed to the handler
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Session tokens are HS512 JWTs with a configurable lifetime (default 5 minutes)
//! - Password digests are never serialized to callers

/// bcrypt password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// User model and record store interface
pub mod users;

/// In-memory record store
pub mod memory;

/// PostgreSQL record store
pub mod postgres;

/// Account service
pub mod service;

/// HTTP handlers for account endpoints
pub mod handlers;

pub use handlers::{LoginRequest, LoginResponse, UserResponse};
pub use memory::InMemoryUserStore;
pub use password::{HashError, PasswordHasher};
pub use postgres::PgUserStore;
pub use service::{AccountService, AccountUpdate, NewAccount};
pub use sessions::{Claims, Identity, TokenError, TokenIssuer};
pub use users::{NewUser, StoreError, User, UserChanges, UserStore};
