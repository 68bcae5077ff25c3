//! Backend Module
//!
//! All server-side code for the account service: the account core
//! (hashing, tokens, store interface, policy), its HTTP boundary and the
//! server wiring.
//!
//! # Architecture
//!
//! - **`auth`** - Account core and HTTP handlers
//! - **`error`** - Error taxonomy and HTTP conversion
//! - **`middleware`** - Bearer token extraction
//! - **`routes`** - Route configuration and router assembly
//! - **`server`** - Application state, store selection, app creation
//!
//! # Request Flow
//!
//! ```text
//! HTTP request → routes → handler (+ AuthUser) → AccountService
//!     → UserStore / PasswordHasher / TokenIssuer → result or AccountError
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<_, AccountError>`; `AccountError` maps each
//! taxonomy kind to one status code and renders a JSON body.

/// Account core and HTTP handlers
pub mod auth;

/// Error taxonomy
pub mod error;

/// Request middleware
pub mod middleware;

/// Route configuration
pub mod routes;

/// Server setup and configuration
pub mod server;
