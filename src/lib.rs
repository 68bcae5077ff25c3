//! usermgmt - account management service
//!
//! Stores user identity records and issues session tokens after verifying a
//! password. See `backend::auth` for the account core.

pub mod backend;
pub mod shared;
