/**
 * Store Configuration
 *
 * Selects the record store backend from the service configuration.
 *
 * # Error Handling
 *
 * A missing or unreachable database does not prevent startup: the server
 * logs the problem and falls back to the in-memory store.
 */

use std::sync::Arc;

use sqlx::PgPool;

use crate::backend::auth::memory::InMemoryUserStore;
use crate::backend::auth::postgres::PgUserStore;
use crate::backend::auth::users::UserStore;
use crate::shared::ServiceConfig;

/// Connect to PostgreSQL and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is successfully configured
/// - `None` if `database_url` is `None` or the connection fails
pub async fn load_database(database_url: Option<&str>) -> Option<PgPool> {
    let database_url = match database_url {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set. Using the in-memory user store.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Using the in-memory user store.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {:?}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// Build the record store the service will use
pub async fn load_store(config: &ServiceConfig) -> Arc<dyn UserStore> {
    match load_database(config.database_url.as_deref()).await {
        Some(pool) => Arc::new(PgUserStore::new(pool)),
        None => Arc::new(InMemoryUserStore::new()),
    }
}
