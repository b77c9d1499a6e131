//! Integration tests for the user service client against a mock server.

use beastxfit_gateway::{GatewayError, RegisterRequest, UserServiceClient};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json(id: &str, email: &str) -> serde_json::Value {
    json!({
        "id": id,
        "federatedId": "kc-1",
        "email": email,
        "firstName": "A",
        "lastName": "B",
        "createdAt": "2026-01-01T10:00:00Z",
        "updatedAt": "2026-01-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_register_posts_camel_case_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/register"))
        .and(body_partial_json(json!({
            "email": "a@x.com",
            "federatedId": "kc-1",
            "firstName": "A",
            "lastName": "B"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u-1", "a@x.com")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UserServiceClient::new(&mock_server.uri());
    let request = RegisterRequest {
        email: "a@x.com".to_string(),
        federated_id: Some("kc-1".to_string()),
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        password: "p".to_string(),
    };

    let user = client.register(&request).await.unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.email, "a@x.com");
    assert_eq!(
        user.created_at,
        "2026-01-01T10:00:00Z".parse::<chrono::DateTime<chrono::Utc>>().unwrap()
    );
}

#[tokio::test]
async fn test_get_profile() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/u-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u-1", "a@x.com")))
        .mount(&mock_server)
        .await;

    let client = UserServiceClient::new(&mock_server.uri());
    let user = client.get_profile("u-1").await.unwrap();
    assert_eq!(user.first_name, "A");
    assert_eq!(user.federated_id.as_deref(), Some("kc-1"));
}

#[tokio::test]
async fn test_get_profile_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"type": "user_not_found", "message": "User not found: missing"}
        })))
        .mount(&mock_server)
        .await;

    let client = UserServiceClient::new(&mock_server.uri());
    let err = client.get_profile("missing").await.unwrap_err();
    assert!(matches!(err, GatewayError::UserNotFound(ref id) if id == "missing"));
}

#[tokio::test]
async fn test_validate_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/kc-1/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(true))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/kc-2/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(false))
        .mount(&mock_server)
        .await;

    let client = UserServiceClient::new(&mock_server.uri());
    assert!(client.validate_user("kc-1").await.unwrap());
    assert!(!client.validate_user("kc-2").await.unwrap());
}

#[tokio::test]
async fn test_service_error_uses_envelope_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/kc-1/validate"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": {"type": "store_unavailable", "message": "User store unavailable: locked"}
        })))
        .mount(&mock_server)
        .await;

    let client = UserServiceClient::new(&mock_server.uri());
    match client.validate_user("kc-1").await.unwrap_err() {
        GatewayError::Service { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "User store unavailable: locked");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unreachable_service() {
    let client = UserServiceClient::new("http://127.0.0.1:1");
    let err = client.validate_user("kc-1").await.unwrap_err();
    assert!(matches!(err, GatewayError::RequestFailed(_)));
}

#[tokio::test]
async fn test_validate_user_id_with_reserved_characters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/a%3Fb%2Fc/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(true))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("a", "a@x.com")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = UserServiceClient::new(&mock_server.uri());
    assert!(client.validate_user("a?b/c").await.unwrap());
}

#[tokio::test]
async fn test_get_profile_id_with_reserved_characters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/u%231"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json("u#1", "a@x.com")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UserServiceClient::new(&mock_server.uri());
    let user = client.get_profile("u#1").await.unwrap();
    assert_eq!(user.id, "u#1");
}
