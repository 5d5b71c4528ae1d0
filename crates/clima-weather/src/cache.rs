//! In-memory lookup cache with a fixed ten minute lifetime.
//!
//! Entries expire lazily: a read that finds a stale entry removes it and
//! reports a miss. Nothing else evicts, so the store grows with the number
//! of distinct keys for the life of the process.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::types::{CoordinateResult, WeatherPayload};

/// Lifetime of a cache entry in milliseconds (10 minutes).
pub const CACHE_TTL_MS: i64 = 600_000;

/// Whether an entry stamped at `timestamp` is stale now.
pub fn is_expired(timestamp: DateTime<Utc>) -> bool {
    is_expired_at(timestamp, Utc::now())
}

/// Whether an entry stamped at `timestamp` is stale at `now`.
pub fn is_expired_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(timestamp).num_milliseconds() > CACHE_TTL_MS
}

/// A cached value and the moment it was stored
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: Arc<T>,
    pub timestamp: DateTime<Utc>,
}

/// One cache namespace: string keys to timestamped values.
///
/// The lock covers a single get or set. A caller that misses, fetches and
/// then sets is not atomic, so two concurrent misses on one key both fetch
/// and the later `set` wins.
#[derive(Debug)]
pub struct CacheStore<T> {
    name: &'static str,
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
}

impl<T> CacheStore<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Look up `key`, dropping the entry if it has expired.
    ///
    /// A hit hands back the stored `Arc`, not a copy of the value.
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        let mut entries = self.entries.lock();

        let expired = match entries.get(key) {
            Some(entry) => is_expired(entry.timestamp),
            None => {
                tracing::trace!(cache = self.name, key, "miss");
                return None;
            }
        };

        if expired {
            entries.remove(key);
            tracing::debug!(cache = self.name, key, "expired entry removed");
            return None;
        }

        tracing::trace!(cache = self.name, key, "hit");
        entries.get(key).map(|entry| Arc::clone(&entry.data))
    }

    /// Store `data` under `key`, stamped now, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, data: T) -> Arc<T> {
        self.insert_at(key, data, Utc::now())
    }

    /// Store `data` with an explicit timestamp.
    pub fn insert_at(&self, key: impl Into<String>, data: T, timestamp: DateTime<Utc>) -> Arc<T> {
        let data = Arc::new(data);
        self.entries.lock().insert(
            key.into(),
            CacheEntry {
                data: Arc::clone(&data),
                timestamp,
            },
        );
        data
    }

    /// Whether an entry is stored for `key`, expired or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// The two independent namespaces used by lookups.
#[derive(Debug)]
pub struct WeatherCache {
    /// Keyed by the city name exactly as requested
    pub coordinates: CacheStore<CoordinateResult>,
    /// Keyed by `"<lat>,<lon>"` (forecast requests add a day-count suffix)
    pub weather: CacheStore<WeatherPayload>,
}

impl WeatherCache {
    pub fn new() -> Self {
        Self {
            coordinates: CacheStore::new("coordinates"),
            weather: CacheStore::new("weather"),
        }
    }

    /// Drop everything in both namespaces.
    pub fn clear(&self) {
        self.coordinates.clear();
        self.weather.clear();
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new()
    }
}
