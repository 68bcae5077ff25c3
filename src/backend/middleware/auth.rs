/**
 * Bearer Token Authentication
 *
 * `AuthUser` is an extractor for routes that require a session token. It
 * reads the `Authorization: Bearer <token>` header, verifies the token
 * through the account service and hands the resulting `Identity` to the
 * handler as an ordinary parameter. Nothing is stashed in request
 * extensions.
 */

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::auth::service::AccountService;
use crate::backend::auth::sessions::Identity;
use crate::backend::error::AccountError;

/// Axum extractor for the authenticated caller
#[derive(Clone, Debug)]
pub struct AuthUser(pub Identity);

/// Pull the token out of an `Authorization` header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for AuthUser
where
    AccountService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AccountError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!("Missing Authorization header");
                AccountError::InvalidToken
            })?;

        let token = bearer_token(header).ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            AccountError::InvalidToken
        })?;

        let service = AccountService::from_ref(state);
        let identity = service.authorize(token).await?;
        Ok(AuthUser(identity))
    }
}
