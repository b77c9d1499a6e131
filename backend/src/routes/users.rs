//! User registration and profile endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use beastxfit_common::{RegisterRequest, UserResponse};

use crate::error::Result;
use crate::AppState;

/// POST /api/users/register - Register a user, or return the one already on file
async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserResponse>> {
    let user = state.users.register(request).await?;
    Ok(Json(user))
}

/// GET /api/users/:user_id - Profile of a user by internal id
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = state.users.get_profile(&user_id).await?;
    Ok(Json(user))
}

/// GET /api/users/:user_id/validate - Whether a profile exists for an
/// identity-provider subject
async fn validate_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<bool>> {
    let exists = state.users.exists_by_federated_id(&user_id).await?;
    Ok(Json(exists))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/:user_id", get(get_profile))
        .route("/api/users/:user_id/validate", get(validate_user))
        .with_state(state)
}
