//! Server Module
//!
//! Server-side setup: application state, store selection and app creation.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Record store selection (PostgreSQL or in-memory)
//! └── init.rs         - App creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Store Selection**: connect to PostgreSQL and migrate, or fall back to memory
//! 2. **Service Creation**: build `AccountService` from `ServiceConfig`
//! 3. **Router Creation**: configure all routes and middleware

/// Application state management
pub mod state;

/// Store configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::{create_app, create_app_with_store};
pub use state::AppState;
