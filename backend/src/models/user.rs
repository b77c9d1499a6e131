use beastxfit_common::{RegisterRequest, UserResponse};
use chrono::{DateTime, Utc};

/// Stored user record.
#[derive(Clone, PartialEq)]
pub struct User {
    /// Generated by the store on insert
    pub id: String,
    /// Subject id from the identity provider
    pub federated_id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Kept as received; never leaves the service
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("federated_id", &self.federated_id)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish_non_exhaustive()
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            federated_id: user.federated_id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Writable fields of a user, handed to `UserStore::save`.
///
/// `id: None` inserts a new record; `Some(id)` updates the existing one.
#[derive(Clone, PartialEq)]
pub struct UserDraft {
    pub id: Option<String>,
    pub federated_id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl std::fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDraft")
            .field("id", &self.id)
            .field("federated_id", &self.federated_id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegisterRequest> for UserDraft {
    fn from(request: RegisterRequest) -> Self {
        Self {
            id: None,
            federated_id: request.federated_id,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
        }
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id.clone()),
            federated_id: user.federated_id.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            password: user.password.clone(),
        }
    }
}
