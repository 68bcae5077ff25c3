/**
 * Login Handler
 *
 * This module implements the authentication handler for POST /auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Issue a session token
 *
 * # Security
 *
 * An unknown email and a wrong password produce the same 401 response, so
 * the endpoint cannot be used to probe which emails are registered.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::service::AccountService;
use crate::backend::error::AccountError;

/// Login handler
///
/// # Example Request
///
/// ```http
/// POST /auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "user@example.com",
///   "password": "securepassword123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "token": "eyJhbGciOiJIUzUxMiIsInR5cCI6IkpXVCJ9...",
///   "message": "Login successful"
/// }
/// ```
pub async fn login(
    State(service): State<AccountService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AccountError> {
    let Json(request) = payload?;
    tracing::info!("Login request for: {}", request.email);

    let token = service
        .authenticate(&request.email, &request.password)
        .await
        .map_err(|e| match e {
            AccountError::NotFound { .. } => AccountError::InvalidCredentials,
            other => other,
        })?;

    Ok(Json(LoginResponse {
        token,
        message: "Login successful".to_string(),
    }))
}
