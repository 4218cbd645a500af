//! In-memory result cache
//!
//! Memoizes read queries by key with a fixed time-to-live. Values are stored
//! as JSON so one cache serves every response type.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        Utc::now() - self.cached_at >= ttl
    }
}

pub struct ResultCache {
    enabled: bool,
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry<serde_json::Value>>>,
}

impl ResultCache {
    pub fn new(enabled: bool, ttl_secs: u64) -> Self {
        Self {
            enabled,
            ttl: Duration::seconds(ttl_secs.min(u64::from(u32::MAX)) as i64),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(false, 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Fetch a live entry. Expired entries are dropped on access.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.enabled {
            return None;
        }

        let mut entries = self.entries.lock().ok()?;
        let value = match entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => entry.data.clone(),
            Some(_) => {
                entries.remove(key);
                return None;
            }
            None => return None,
        };
        drop(entries);

        match serde_json::from_value(value) {
            Ok(data) => {
                tracing::debug!("cache hit: {}", key);
                Some(data)
            }
            Err(e) => {
                tracing::warn!("cache entry {} has unexpected shape: {}", key, e);
                None
            }
        }
    }

    pub fn put<T: Serialize>(&self, key: &str, data: &T) {
        if !self.enabled {
            return;
        }

        let value = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("not caching {}: {}", key, e);
                return;
            }
        };

        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), CacheEntry::new(value));
        }
    }

    /// Return the cached value for `key` or compute, store and return it
    pub fn get_or_try_insert<T, E, F>(&self, key: &str, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let data = compute()?;
        self.put(key, &data);
        Ok(data)
    }

    /// Drop every entry, returning how many were removed
    pub fn clear(&self) -> usize {
        match self.entries.lock() {
            Ok(mut entries) => {
                let removed = entries.len();
                entries.clear();
                removed
            }
            Err(_) => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
