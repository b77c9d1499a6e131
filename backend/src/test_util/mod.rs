use std::sync::Arc;

use beastxfit_common::RegisterRequest;

use crate::config::{Config, CorsConfig, DatabaseConfig, LoggingConfig};
use crate::store::MemoryUserStore;
use crate::AppState;

pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 8080,
        database: DatabaseConfig {
            url: "memory".to_string(),
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        cors: CorsConfig { origins: "*".to_string() },
    }
}

/// State backed by a fresh in-memory store.
pub fn create_test_state() -> Arc<AppState> {
    Arc::new(AppState::new(test_config(), Arc::new(MemoryUserStore::new())))
}

pub fn test_register_request(email: &str, federated_id: Option<&str>) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        federated_id: federated_id.map(String::from),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        password: "password".to_string(),
    }
}
