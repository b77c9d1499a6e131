pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;
pub mod test_util;

pub use config::{Config, CorsConfig, DatabaseConfig, LoggingConfig};
pub use error::ServiceError;
pub use models::{User, UserDraft};
pub use service::UserService;
pub use store::{MemoryUserStore, SqliteUserStore, StoreError, UserStore};

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Backing store, also used directly by the health check.
    pub store: Arc<dyn UserStore>,
    pub users: UserService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn UserStore>) -> Self {
        Self {
            config,
            users: UserService::new(store.clone()),
            store,
        }
    }
}

/// Build the CORS layer from the configured origin list.
pub fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match cors.allowed_origins() {
        None => layer.allow_origin(Any),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(origins))
        }
    }
}

/// Full application router with logging and CORS layers.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .merge(routes::health::router(state.clone()))
        .merge(routes::users::router(state))
        .layer(middleware::from_fn(logging::request_logger))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
