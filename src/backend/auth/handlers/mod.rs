//! Account Handlers Module
//!
//! HTTP handlers for the account endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── accounts.rs - Account CRUD handlers
//! ├── login.rs    - Credential check / token issuance
//! └── me.rs       - Get current user handler
//! ```
//!
//! # Handlers
//!
//! - **`create_account`** - POST /users
//! - **`list_accounts`** - GET /users
//! - **`get_account`** - GET /users/{id}
//! - **`update_account`** - PUT /users/{id}
//! - **`delete_account`** - DELETE /users/{id}
//! - **`login`** - POST /auth/login
//! - **`get_me`** - GET /auth/me

/// Request and response types
pub mod types;

/// Account CRUD handlers
pub mod accounts;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use types::{LoginRequest, LoginResponse, UserResponse};

pub use accounts::{create_account, delete_account, get_account, list_accounts, update_account};
pub use login::login;
pub use me::get_me;
