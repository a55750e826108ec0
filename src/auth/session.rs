//! Login/logout state on top of the token store

use crate::auth::token_store::TokenStore;
use crate::storage::KeyValueStore;
use crate::types::ApiError;
use std::sync::Arc;

/// Key under which the signed-in user's profile is kept
pub const USER_DATA_KEY: &str = "userData";

#[derive(Clone)]
pub struct Session {
    tokens: TokenStore,
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(tokens: TokenStore, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            tokens,
            store,
        }
    }

    pub fn login(&self, token: impl Into<String>) -> Result<(), ApiError> {
        log::info!("Storing session token");
        self.tokens.set(token)
    }

    /// Replace the token after a refresh; the stored profile is kept.
    pub fn refresh(&self, token: impl Into<String>) -> Result<(), ApiError> {
        log::debug!("Replacing session token after refresh");
        self.tokens.set(token)
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        log::info!("Clearing session");
        self.tokens.clear()?;
        self.store.clear_key(USER_DATA_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_present()
    }
}
