use std::sync::Arc;

use beastxfit_common::{RegisterRequest, UserResponse};

use crate::error::{Result, ServiceError};
use crate::models::UserDraft;
use crate::store::{StoreError, UserStore};

/// Registration and profile lookups.
///
/// Registration is idempotent per email: registering an email that is
/// already on file returns the stored user untouched instead of failing.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Return the user registered under `request.email`, creating it first if
    /// the email is new.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse> {
        if self.store.exists_by_email(&request.email).await? {
            tracing::debug!("Email already registered, returning existing user: {}", request.email);
            return self.existing_by_email(&request.email).await;
        }

        let email = request.email.clone();
        match self.store.save(UserDraft::from(request)).await {
            Ok(user) => {
                tracing::info!("Registered new user: {} ({})", user.id, user.email);
                Ok(user.into())
            }
            // Another registration for the same email won between our check and insert.
            Err(StoreError::EmailTaken(_)) => {
                tracing::debug!("Concurrent registration for {}, returning winner", email);
                self.existing_by_email(&email).await
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<UserResponse> {
        self.store
            .find_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| ServiceError::UserNotFound(user_id.to_string()))
    }

    /// Whether a local profile exists for an identity-provider subject.
    pub async fn exists_by_federated_id(&self, federated_id: &str) -> Result<bool> {
        tracing::info!("Checking user existence for federated id {}", federated_id);
        Ok(self.store.exists_by_federated_id(federated_id).await?)
    }

    /// Number of registered users.
    pub async fn user_count(&self) -> Result<u64> {
        Ok(self.store.count().await?)
    }

    async fn existing_by_email(&self, email: &str) -> Result<UserResponse> {
        self.store
            .find_by_email(email)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| {
                ServiceError::StoreUnavailable(format!(
                    "user for {} reported as existing but could not be read",
                    email
                ))
            })
    }
}
