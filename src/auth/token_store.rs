//! Bearer token storage

use crate::storage::KeyValueStore;
use crate::types::ApiError;
use serde_json::Value;
use std::sync::Arc;

pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Holds the opaque bearer token in the key-value store.
///
/// Nothing is validated on write; whether a token is usable is decided by
/// the request builder when it is read.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl TokenStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_TOKEN_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current token; empty strings and non-string values count as absent.
    pub fn get(&self) -> Option<String> {
        match self.store.get(&self.key)? {
            Value::String(token) if !token.is_empty() => Some(token),
            Value::String(_) | Value::Null => None,
            _ => {
                log::warn!("Stored value under '{}' is not a token string", self.key);
                None
            },
        }
    }

    pub fn set(&self, token: impl Into<String>) -> Result<(), ApiError> {
        self.store.set(&self.key, Value::String(token.into()))
    }

    pub fn clear(&self) -> Result<(), ApiError> {
        self.store.clear_key(&self.key)
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_set_get_clear() {
        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(tokens.get(), None);

        tokens.set("a.b.c").unwrap();
        assert_eq!(tokens.get(), Some("a.b.c".to_string()));

        tokens.set("not-even-a-jwt").unwrap();
        assert_eq!(tokens.get(), Some("not-even-a-jwt".to_string()));

        tokens.clear().unwrap();
        assert!(!tokens.is_present());
    }

    #[test]
    fn test_non_string_values_are_absent() {
        let store = Arc::new(MemoryStore::new());
        let tokens = TokenStore::with_key(store.clone(), "auth");

        store.set("auth", json!({"token": "x"})).unwrap();
        assert_eq!(tokens.get(), None);

        store.set("auth", json!("")).unwrap();
        assert_eq!(tokens.get(), None);
    }
}
