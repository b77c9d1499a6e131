use beastxfit_common::{ErrorResponse, RegisterRequest, UserResponse};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

/// Client for the user service HTTP API.
#[derive(Clone)]
pub struct UserServiceClient {
    http_client: Client,
    base_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("User service error ({status}): {message}")]
    Service { status: u16, message: String },
}

impl UserServiceClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http_client: Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST /api/users/register
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserResponse, GatewayError> {
        let url = self.endpoint(&["api", "users", "register"])?;
        tracing::debug!("Registering user {} via {}", request.email, url);

        let response = self.http_client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        Self::read_json(response).await
    }

    /// GET /api/users/:user_id
    pub async fn get_profile(&self, user_id: &str) -> Result<UserResponse, GatewayError> {
        let url = self.endpoint(&["api", "users", user_id])?;
        tracing::debug!("Fetching user profile: {}", url);

        let response = self.http_client
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::UserNotFound(user_id.to_string()));
        }

        Self::read_json(response).await
    }

    /// GET /api/users/:user_id/validate
    ///
    /// `user_id` is the identity-provider subject, as carried in the
    /// caller's token.
    pub async fn validate_user(&self, user_id: &str) -> Result<bool, GatewayError> {
        let url = self.endpoint(&["api", "users", user_id, "validate"])?;
        tracing::info!("Calling user validation API for user id: {}", user_id);

        let response = self.http_client
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        Self::read_json(response).await
    }

    /// Append `segments` to the base URL, percent-encoding each one so ids
    /// containing `/`, `?` or `#` stay a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(format!("{}: cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GatewayError::Service {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }
}
