//! Injectable TTL cache
//!
//! Caches are explicit values handed to the components that use them, with a
//! bounded lifetime per entry and explicit invalidation. Nothing here is
//! process-global.

use std::hash::Hash;
use std::time::Duration;

use moka::sync::Cache;
use serde::{Deserialize, Serialize};

/// Lifetime and size bounds for a [`TtlCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Seconds an entry stays valid after insertion
    pub ttl_secs: u64,
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            max_capacity: 10_000,
        }
    }
}

/// A named, thread-safe cache with time-to-live expiry
#[derive(Clone)]
pub struct TtlCache<K, V> {
    name: &'static str,
    settings: CacheSettings,
    inner: Cache<K, V>,
}

impl<K, V> std::fmt::Debug for TtlCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("name", &self.name)
            .field("settings", &self.settings)
            .finish()
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty cache
    pub fn new(name: &'static str, settings: CacheSettings) -> Self {
        let inner = Cache::builder()
            .max_capacity(settings.max_capacity)
            .time_to_live(Duration::from_secs(settings.ttl_secs))
            .build();

        Self { name, settings, inner }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn settings(&self) -> CacheSettings {
        self.settings
    }

    /// Returns the cached value, if present and not expired
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key)
    }

    pub fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value);
    }

    /// Returns the cached value or loads, stores, and returns it
    ///
    /// Load errors are returned as-is and nothing is cached.
    pub fn get_or_try_insert_with<F, E>(&self, key: K, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.inner.get(&key) {
            tracing::trace!(cache = self.name, "cache hit");
            return Ok(hit);
        }

        tracing::trace!(cache = self.name, "cache miss");
        let value = load()?;
        self.inner.insert(key, value.clone());
        Ok(value)
    }

    /// Drops a single entry
    pub fn invalidate(&self, key: &K) {
        self.inner.invalidate(key);
    }

    /// Drops every entry
    pub fn invalidate_all(&self) {
        tracing::debug!(cache = self.name, "invalidating all entries");
        self.inner.invalidate_all();
    }

    /// Number of live entries, after flushing pending maintenance
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}
