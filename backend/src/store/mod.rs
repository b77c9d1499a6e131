//! User persistence layer.
//!
//! This module defines the `UserStore` trait that the service layer depends
//! on, with a SQLite implementation for deployments and an in-memory one for
//! tests and throwaway runs.

mod memory;
mod sqlite;

pub use memory::MemoryUserStore;
pub use sqlite::SqliteUserStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{User, UserDraft};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Email already registered: {0}")]
    EmailTaken(String),
    #[error("User not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Durable mapping from user identity and email to a user record.
///
/// `save` must enforce email uniqueness atomically: of two concurrent inserts
/// with the same email, exactly one succeeds and the other gets
/// `StoreError::EmailTaken`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Short name of the backing engine (e.g., "sqlite", "memory").
    fn backend(&self) -> &'static str;

    async fn exists_by_email(&self, email: &str) -> Result<bool>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    async fn exists_by_federated_id(&self, federated_id: &str) -> Result<bool>;

    /// Insert (`draft.id == None`) or update a user.
    ///
    /// Inserts get a fresh id and `created_at == updated_at == now`.
    /// Updates keep the id and `created_at` and refresh `updated_at`.
    async fn save(&self, draft: UserDraft) -> Result<User>;

    /// Number of stored users.
    async fn count(&self) -> Result<u64>;
}

/// Open the store named by `database.url`.
///
/// `memory` selects `MemoryUserStore`; anything else is handed to SQLite.
pub fn open(database_url: &str) -> Result<Arc<dyn UserStore>> {
    if database_url == "memory" {
        tracing::info!("Using in-memory user store");
        return Ok(Arc::new(MemoryUserStore::new()));
    }
    Ok(Arc::new(SqliteUserStore::new(database_url)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory() {
        let store = open("memory").unwrap();
        assert_eq!(store.backend(), "memory");
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_open_sqlite_in_memory() {
        let store = open("sqlite::memory:").unwrap();
        assert_eq!(store.backend(), "sqlite");
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
