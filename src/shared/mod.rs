//! Shared Module
//!
//! Types that are used by every layer of the service rather than belonging to
//! the HTTP backend specifically. Today that is the typed service
//! configuration.

/// Service configuration
pub mod config;

pub use config::{ConfigError, ServiceConfig, ServiceConfigBuilder};
