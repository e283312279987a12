//! Runtime Configuration
//!
//! API base URL comes from `ATELIER_API_URL` at build time; the bearer
//! token is whatever the sign-in flow left in local storage.

use atelier_core::{ApiConfig, KvStorage};

/// Used when `ATELIER_API_URL` is not set at build time
const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Local storage key written by the sign-in flow
pub const TOKEN_STORAGE_KEY: &str = "auth-token";

pub fn api_config(storage: &dyn KvStorage) -> ApiConfig {
    let base_url = option_env!("ATELIER_API_URL").unwrap_or(DEFAULT_API_URL);
    with_stored_token(ApiConfig::new(base_url), storage)
}

fn with_stored_token(config: ApiConfig, storage: &dyn KvStorage) -> ApiConfig {
    match storage.get(TOKEN_STORAGE_KEY) {
        Ok(Some(token)) if !token.trim().is_empty() => config.with_token(token.trim()),
        Ok(_) => config,
        Err(e) => {
            tracing::warn!("Could not read auth token: {}", e);
            config
        }
    }
}
