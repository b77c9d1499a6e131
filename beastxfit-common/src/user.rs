//! Registration request and user view shared between services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/users/register`.
#[derive(Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    /// Subject id issued by the identity provider.
    #[serde(default, alias = "keycloakId", skip_serializing_if = "Option::is_none")]
    pub federated_id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("federated_id", &self.federated_id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"***")
            .finish()
    }
}

/// Public view of a stored user. Never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub federated_id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_camel_case() {
        let json = r#"{
            "email": "a@x.com",
            "federatedId": "kc-1",
            "firstName": "A",
            "lastName": "B",
            "password": "p"
        }"#;

        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.email, "a@x.com");
        assert_eq!(request.federated_id, Some("kc-1".to_string()));
        assert_eq!(request.first_name, "A");
        assert_eq!(request.last_name, "B");
        assert_eq!(request.password, "p");
    }

    #[test]
    fn test_register_request_accepts_keycloak_alias() {
        let json = r#"{"email": "a@x.com", "keycloakId": "kc-2"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.federated_id, Some("kc-2".to_string()));
        assert_eq!(request.first_name, "");
    }

    #[test]
    fn test_register_request_debug_hides_password() {
        let request = RegisterRequest {
            email: "a@x.com".to_string(),
            password: "hunter2".to_string(),
            ..Default::default()
        };
        let debug = format!("{:?}", request);
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_user_response_serialization() {
        let now = Utc::now();
        let response = UserResponse {
            id: "u-1".to_string(),
            federated_id: None,
            email: "a@x.com".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""firstName":"A""#));
        assert!(json.contains(r#""createdAt""#));
        assert!(!json.contains("federatedId"));
        assert!(!json.contains("password"));
    }
}
