/**
 * Application State
 *
 * `AppState` is the router state shared by every handler. It holds the
 * account service, which in turn owns the record store, the password hasher
 * and the token issuer. Cloning is cheap: the store sits behind an `Arc`.
 *
 * The `FromRef` implementation lets handlers (and the `AuthUser` extractor)
 * take `State<AccountService>` without seeing the whole `AppState`.
 */

use axum::extract::FromRef;

use crate::backend::auth::service::AccountService;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Account service used by all account endpoints
    pub accounts: AccountService,
}

impl AppState {
    pub fn new(accounts: AccountService) -> Self {
        Self { accounts }
    }
}

impl FromRef<AppState> for AccountService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.accounts.clone()
    }
}
