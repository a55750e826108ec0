//! Type definitions for member_portal_client
//!
//! Contains the shared error types and configuration models used throughout
//! the client.

use std::path::PathBuf;
use thiserror::Error;

/// Default validity window of a cached list response, in milliseconds.
pub const DEFAULT_CACHE_TTL_MS: i64 = 3_600_000;

/// Binary startup errors
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Client initialisation error: {0}")]
    Client(String),
    #[error("Usage: {0}")]
    Usage(String),
    #[error("Request failed: {0}")]
    Request(String),
}

/// Errors raised by the request builder, the transport and the services.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// A call needed a credential and the token store was empty.
    #[error("No authentication token found")]
    MissingToken,

    /// The stored token could not be decoded into an identity.
    #[error("Invalid authentication token: {0}")]
    MalformedToken(String),

    /// The transport rejected the call or the server answered non-2xx.
    #[error("{message}")]
    Network {
        status: Option<u16>,
        message: String,
    },

    /// The normalized payload did not match the expected model.
    #[error("Unexpected response payload: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {message}")]
    Config {
        message: String,
    },
}

impl ApiError {
    pub fn network(status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::Network {
            status,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ApiError::Config {
            message: message.into(),
        }
    }

    /// HTTP status carried by a network failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network {
                status,
                ..
            } => *status,
            _ => None,
        }
    }

    /// Text shown to the user; falls back when the error carries no message.
    pub fn user_message(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        ApiError::Decode(error.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Network {
            status: error.status().map(|s| s.as_u16()),
            message: error.to_string(),
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub route: String,
    pub cache_ttl_ms: i64,
    pub token_key: String,
    pub storage_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gbs-connect.com".to_string(),
            route: "mobile".to_string(),
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            token_key: "token".to_string(),
            storage_path: None,
            log_level: "info".to_string(),
        }
    }
}
