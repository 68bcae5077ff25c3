/**
 * Server Initialization
 *
 * Builds the Axum application: selects the record store, constructs the
 * account service from the configuration and assembles the router.
 */

use std::sync::Arc;

use axum::Router;

use crate::backend::auth::service::AccountService;
use crate::backend::auth::users::UserStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::shared::ServiceConfig;

/// Create and configure the Axum application
///
/// Uses PostgreSQL when `config.database_url` is set and reachable, the
/// in-memory store otherwise.
pub async fn create_app(config: &ServiceConfig) -> Router<()> {
    tracing::info!("Initializing account service");

    let store = load_store(config).await;
    create_app_with_store(store, config)
}

/// Create the Axum application over an already constructed store
pub fn create_app_with_store(store: Arc<dyn UserStore>, config: &ServiceConfig) -> Router<()> {
    let accounts = AccountService::new(store, config);
    tracing::info!(
        "Account service ready (token ttl {}s, bcrypt cost {})",
        config.token_ttl.as_secs(),
        config.bcrypt_cost
    );

    create_router(AppState::new(accounts))
}
