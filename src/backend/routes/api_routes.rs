/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Accounts
 * - `POST /users` - Create account (public)
 * - `GET /users` - List accounts
 * - `GET /users/{id}` - Get account
 * - `PUT /users/{id}` - Update account
 * - `DELETE /users/{id}` - Delete account
 *
 * ## Authentication
 * - `POST /auth/login` - Exchange email and password for a session token (public)
 * - `GET /auth/me` - Get the authenticated caller's account
 *
 * Protection is per handler: every handler that takes an `AuthUser`
 * parameter rejects requests without a valid bearer token.
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{
    create_account, delete_account, get_account, get_me, list_accounts, login, update_account,
};
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Account endpoints
        .route("/users", post(create_account).get(list_accounts))
        .route(
            "/users/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
        // Authentication endpoints
        .route("/auth/login", post(login))
        .route("/auth/me", get(get_me))
}
