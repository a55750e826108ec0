//! Configuration management for member_portal_client
//!
//! Loads the client configuration from environment variables (after
//! `dotenvy` has populated them from `.env`) with defaults, then validates it.

use crate::types::{ApiError, ClientConfig, DEFAULT_CACHE_TTL_MS};
use std::env;
use std::path::PathBuf;

/// Load the client configuration from the process environment
pub fn load_config() -> Result<ClientConfig, ApiError> {
    load_config_from(|key| env::var(key).ok())
}

/// Load the client configuration through an arbitrary variable lookup
pub fn load_config_from<F>(lookup: F) -> Result<ClientConfig, ApiError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ClientConfig::default();

    let config = ClientConfig {
        base_url: lookup("PORTAL_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url),
        route: lookup("PORTAL_ROUTE")
            .map(|route| route.trim_matches('/').to_string())
            .unwrap_or(defaults.route),
        cache_ttl_ms: load_cache_ttl(&lookup)?,
        token_key: lookup("PORTAL_TOKEN_KEY").unwrap_or(defaults.token_key),
        storage_path: lookup("PORTAL_STORAGE_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from),
        log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
    };

    validate_config(&config)?;
    Ok(config)
}

fn load_cache_ttl<F>(lookup: &F) -> Result<i64, ApiError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup("PORTAL_CACHE_TTL_MS") {
        Some(raw) => raw.trim().parse().map_err(|_| {
            ApiError::config(format!("PORTAL_CACHE_TTL_MS must be an integer, got '{}'", raw))
        }),
        None => Ok(DEFAULT_CACHE_TTL_MS),
    }
}

/// Validate configuration values
pub fn validate_config(config: &ClientConfig) -> Result<(), ApiError> {
    if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
        return Err(ApiError::config(format!(
            "Base URL must start with http:// or https://, got '{}'",
            config.base_url
        )));
    }

    if config.route.is_empty() {
        return Err(ApiError::config("API route can't be empty"));
    }

    if config.cache_ttl_ms <= 0 {
        return Err(ApiError::config("Cache TTL must be a positive number of milliseconds"));
    }

    if config.token_key.trim().is_empty() {
        return Err(ApiError::config("Token storage key can't be empty"));
    }

    log::debug!("Configuration validated for {}", config.base_url);
    Ok(())
}
