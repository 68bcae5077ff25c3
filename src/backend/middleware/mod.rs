//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! - **`auth`** - Bearer token extraction and verification (`AuthUser`)

pub mod auth;

pub use auth::{bearer_token, AuthUser};
