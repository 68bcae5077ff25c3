/**
 * Account Handlers
 *
 * CRUD endpoints over user accounts:
 *
 * - `POST /users` - create an account (public)
 * - `GET /users` - list accounts (bearer token)
 * - `GET /users/{id}` - fetch one account (bearer token)
 * - `PUT /users/{id}` - replace an account's fields (bearer token)
 * - `DELETE /users/{id}` - delete an account (bearer token)
 *
 * Handlers only translate between HTTP and the `AccountService`; errors are
 * returned as `AccountError` and rendered by its `IntoResponse` impl. Body
 * and path extraction failures become `Validation` errors the same way.
 */

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::service::{AccountService, AccountUpdate, NewAccount};
use crate::backend::error::AccountError;
use crate::backend::middleware::AuthUser;

/// Create account handler
///
/// # Example Request
///
/// ```http
/// POST /users HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "correct horse",
///   "display_name": "Alice"
/// }
/// ```
pub async fn create_account(
    State(service): State<AccountService>,
    payload: Result<Json<NewAccount>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AccountError> {
    let Json(candidate) = payload?;
    tracing::info!("Create account request for: {}", candidate.email);
    let user = service.create_account(candidate).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// List accounts handler
pub async fn list_accounts(
    State(service): State<AccountService>,
    AuthUser(_caller): AuthUser,
) -> Result<Json<Vec<UserResponse>>, AccountError> {
    let users = service.list_accounts().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get account handler
pub async fn get_account(
    State(service): State<AccountService>,
    AuthUser(_caller): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserResponse>, AccountError> {
    let Path(id) = id?;
    let user = service.get_account(id).await?;
    Ok(Json(user.into()))
}

/// Update account handler
///
/// Omitting `password` keeps the current password.
pub async fn update_account(
    State(service): State<AccountService>,
    AuthUser(caller): AuthUser,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<AccountUpdate>, JsonRejection>,
) -> Result<Json<UserResponse>, AccountError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    tracing::info!("User {} updating account {}", caller.user_id, id);
    let user = service.update_account(id, update).await?;
    Ok(Json(user.into()))
}

/// Delete account handler
pub async fn delete_account(
    State(service): State<AccountService>,
    AuthUser(caller): AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AccountError> {
    let Path(id) = id?;
    tracing::info!("User {} deleting account {}", caller.user_id, id);
    service.delete_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
