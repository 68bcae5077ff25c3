/**
 * In-Memory User Store
 *
 * A `UserStore` kept in process memory. It enforces the same uniqueness
 * constraints the PostgreSQL schema does, so the service behaves identically
 * against either backend. Used when no database is configured and in tests.
 */

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::backend::auth::users::{NewUser, StoreError, User, UserChanges, UserStore};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, User>,
    next_id: i64,
}

impl Table {
    /// Reject `username`/`email` if held by a row other than `except`
    fn check_unique(&self, username: &str, email: &str, except: Option<i64>) -> Result<(), StoreError> {
        for row in self.rows.values().filter(|row| Some(row.id) != except) {
            if row.email == email {
                return Err(StoreError::unique_violation("email", email));
            }
            if row.username == username {
                return Err(StoreError::unique_violation("username", username));
            }
        }
        Ok(())
    }
}

/// Process-local user store
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    table: RwLock<Table>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<User, StoreError> {
        let table = self.table.read().await;
        table
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn get_by_email(&self, email: &str) -> Result<User, StoreError> {
        let table = self.table.read().await;
        table
            .rows
            .values()
            .find(|row| row.email == email)
            .cloned()
            .ok_or_else(|| StoreError::not_found(email))
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut table = self.table.write().await;
        table.check_unique(&user.username, &user.email, None)?;

        table.next_id += 1;
        let now = Utc::now();
        let record = User {
            id: table.next_id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            display_name: user.display_name,
            is_active: user.is_active,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(record.id, record.clone());

        tracing::debug!("Stored user {} in memory", record.id);
        Ok(record)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> Result<User, StoreError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Err(StoreError::not_found(id));
        }
        table.check_unique(&changes.username, &changes.email, Some(id))?;

        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(id))?;
        row.username = changes.username;
        row.email = changes.email;
        row.password_hash = changes.password_hash;
        row.display_name = changes.display_name;
        row.is_active = changes.is_active;
        row.updated_at = Utc::now();

        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().any(|row| row.email == email))
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().any(|row| row.username == username))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.contains_key(&id))
    }
}
