//! Time-boxed response cache
//!
//! Entries are stored as `{data, timestamp}` in the key-value store. An entry
//! older than the TTL is treated as absent but left in place; the next write
//! supersedes it.

use crate::storage::KeyValueStore;
use crate::types::{ApiError, DEFAULT_CACHE_TTL_MS};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Millisecond wall clock
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Stored snapshot of a list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: i64,
}

#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttl_ms: i64,
}

impl ResponseCache {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(store, clock, DEFAULT_CACHE_TTL_MS)
    }

    pub fn with_ttl(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, ttl_ms: i64) -> Self {
        Self {
            store,
            clock,
            ttl_ms,
        }
    }

    pub fn ttl_ms(&self) -> i64 {
        self.ttl_ms
    }

    /// Fresh cached value for `key`, or `None` when missing, unreadable or stale.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.store.get(key)?;

        let parsed = match raw {
            Value::String(text) => serde_json::from_str::<CacheEntry<T>>(&text),
            other => serde_json::from_value::<CacheEntry<T>>(other),
        };

        let entry = match parsed {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Ignoring unreadable cache entry '{}': {}", key, e);
                return None;
            },
        };

        // An age that overflows can only come from a corrupted timestamp.
        match self.clock.now_millis().checked_sub(entry.timestamp) {
            Some(age) if age < self.ttl_ms => Some(entry.data),
            Some(age) => {
                log::debug!("Cache entry '{}' is stale ({} ms old)", key, age);
                None
            },
            None => {
                log::warn!("Ignoring cache entry '{}' with timestamp {}", key, entry.timestamp);
                None
            },
        }
    }

    /// Overwrite `key` with `value` stamped at the current time
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ApiError> {
        let entry = CacheEntry {
            data: value,
            timestamp: self.clock.now_millis(),
        };
        let text = serde_json::to_string(&entry)?;
        self.store.set(key, Value::String(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::ManualClock;
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn cache_with_clock(start: i64) -> (ResponseCache, Arc<ManualClock>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(start));
        let cache = ResponseCache::new(store.clone(), clock.clone());
        (cache, clock, store)
    }

    #[test]
    fn test_set_then_get_in_same_tick() {
        let (cache, _clock, _store) = cache_with_clock(1_000);

        cache.set("k", &vec!["Pune", "Surat"]).unwrap();
        let hit: Option<Vec<String>> = cache.get("k");

        assert_eq!(hit, Some(vec!["Pune".to_string(), "Surat".to_string()]));
    }

    #[test]
    fn test_entry_expires_after_one_hour() {
        let (cache, clock, store) = cache_with_clock(1_000);

        cache.set("k", &json!({"x": 1})).unwrap();
        clock.advance(3_600_001);

        assert_eq!(cache.get::<Value>("k"), None);
        // Stale entries stay in storage until superseded.
        assert!(store.get("k").is_some());
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let (cache, clock, _store) = cache_with_clock(0);

        cache.set("k", &1u32).unwrap();
        clock.advance(3_599_999);
        assert_eq!(cache.get::<u32>("k"), Some(1));

        clock.advance(1);
        assert_eq!(cache.get::<u32>("k"), None);
    }

    #[test]
    fn test_stale_entry_is_refreshed_by_set() {
        let (cache, clock, _store) = cache_with_clock(0);

        cache.set("k", &"old").unwrap();
        clock.advance(4_000_000);
        assert_eq!(cache.get::<String>("k"), None);

        cache.set("k", &"new").unwrap();
        assert_eq!(cache.get::<String>("k"), Some("new".to_string()));
    }

    #[test]
    fn test_object_and_corrupted_entries() {
        let (cache, _clock, store) = cache_with_clock(500);

        store.set("object", json!({"data": [1, 2], "timestamp": 400})).unwrap();
        assert_eq!(cache.get::<Vec<u8>>("object"), Some(vec![1, 2]));

        store.set("garbage", json!("{not json")).unwrap();
        assert_eq!(cache.get::<Vec<u8>>("garbage"), None);

        assert_eq!(cache.get::<Vec<u8>>("missing"), None);
    }

    #[test]
    fn test_out_of_range_timestamp_is_stale() {
        let (cache, _clock, store) = cache_with_clock(500);

        store.set("ancient", json!({"data": [1], "timestamp": i64::MIN})).unwrap();
        assert_eq!(cache.get::<Vec<u8>>("ancient"), None);
        // Left in place like any other stale entry.
        assert!(store.get("ancient").is_some());
    }
}
