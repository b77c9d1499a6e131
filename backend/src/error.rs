//! Error types for the user service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use beastxfit_common::ErrorResponse;

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ServiceError::UserNotFound(_) => "user_not_found",
            ServiceError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ServiceError::UserNotFound(id),
            other => ServiceError::StoreUnavailable(other.to_string()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(ErrorResponse::new(self.error_type(), self.to_string()));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_service_errors() {
        let not_found = ServiceError::from(StoreError::NotFound("u-1".to_string()));
        assert!(matches!(not_found, ServiceError::UserNotFound(ref id) if id == "u-1"));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let db = ServiceError::from(StoreError::DatabaseError("disk I/O error".to_string()));
        assert!(matches!(db, ServiceError::StoreUnavailable(_)));
        assert_eq!(db.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(db.error_type(), "store_unavailable");
    }

    #[test]
    fn test_into_response_status() {
        let response = ServiceError::UserNotFound("u-1".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
