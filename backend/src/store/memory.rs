use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Result, StoreError, UserStore};
use crate::models::{User, UserDraft};

/// Non-persistent user store keyed by id.
///
/// Every `save` runs under the write lock, so the email check and the insert
/// cannot interleave with another writer.
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

fn email_taken_by_other(users: &HashMap<String, User>, email: &str, id: Option<&str>) -> bool {
    users
        .values()
        .any(|u| u.email == email && Some(u.id.as_str()) != id)
}

#[async_trait]
impl UserStore for MemoryUserStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn exists_by_federated_id(&self, federated_id: &str) -> Result<bool> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.federated_id.as_deref() == Some(federated_id)))
    }

    async fn save(&self, draft: UserDraft) -> Result<User> {
        let mut users = self.users.write().await;
        let now = Utc::now();

        if email_taken_by_other(&users, &draft.email, draft.id.as_deref()) {
            return Err(StoreError::EmailTaken(draft.email));
        }

        let user = match draft.id {
            None => User {
                id: uuid::Uuid::new_v4().to_string(),
                federated_id: draft.federated_id,
                email: draft.email,
                first_name: draft.first_name,
                last_name: draft.last_name,
                password: draft.password,
                created_at: now,
                updated_at: now,
            },
            Some(id) => {
                let existing = users.get(&id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
                User {
                    created_at: existing.created_at,
                    id,
                    federated_id: draft.federated_id,
                    email: draft.email,
                    first_name: draft.first_name,
                    last_name: draft.last_name,
                    password: draft.password,
                    updated_at: now,
                }
            }
        };

        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.users.read().await.len() as u64)
    }
}
