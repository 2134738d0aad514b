//! Token → context identifier caching with moka
//!
//! Process-wide cache consulted before every token exchange when cluster
//! context support is enabled.
//!
//! # Architecture
//!
//! - **Keys**: SHA-256 of the bearer token, so raw credentials are never
//!   retained as map keys
//! - **Expiry**: per entry, taken from the TTL passed to `store`; storing
//!   again for the same token refreshes it
//! - **Capacity**: fixed at construction; at capacity a store always lands and
//!   the least recently used entry is evicted (LRU, not TinyLFU admission)
//! - **Error Handling**: nothing but successful exchanges is ever stored

use std::sync::Arc;
use std::time::{Duration, Instant};

use clavis_common::CanonicalHasher;
use clavis_core::ContextStore;
use clavis_domain::constants::DEFAULT_CACHE_SIZE;
use clavis_domain::{BearerToken, CacheSettings};
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use moka::Expiry;

use crate::observability::metrics::ContextCacheMetrics;

/// Context cache configuration
#[derive(Debug, Clone)]
pub struct ContextCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
}

impl Default for ContextCacheConfig {
    fn default() -> Self {
        Self { max_capacity: DEFAULT_CACHE_SIZE }
    }
}

impl From<&CacheSettings> for ContextCacheConfig {
    fn from(settings: &CacheSettings) -> Self {
        Self { max_capacity: settings.cache_size }
    }
}

impl ContextCacheConfig {
    /// Log configuration at startup
    pub fn log_config(&self) {
        tracing::info!(max_capacity = self.max_capacity, "Context cache configuration loaded");
    }
}

#[derive(Debug, Clone)]
struct ContextEntry {
    context_id: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct PerEntryTtl;

impl Expiry<String, ContextEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &ContextEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &ContextEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Bounded, TTL-aware token → context identifier cache
///
/// Cheap to share behind an `Arc`; all operations take `&self`.
pub struct ContextCache {
    entries: Cache<String, ContextEntry>,
    hasher: CanonicalHasher,
    metrics: Arc<ContextCacheMetrics>,
    config: ContextCacheConfig,
}

impl ContextCache {
    pub fn new(config: ContextCacheConfig) -> Self {
        Self::with_metrics(config, Arc::new(ContextCacheMetrics::new()))
    }

    pub fn with_metrics(config: ContextCacheConfig, metrics: Arc<ContextCacheMetrics>) -> Self {
        config.log_config();

        let entries = Cache::builder()
            .name("clavis-context-cache")
            .max_capacity(config.max_capacity)
            .eviction_policy(EvictionPolicy::lru())
            .expire_after(PerEntryTtl)
            .build();

        Self { entries, hasher: CanonicalHasher::new(), metrics, config }
    }

    pub fn config(&self) -> &ContextCacheConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<ContextCacheMetrics> {
        &self.metrics
    }

    /// Approximate number of live entries.
    pub fn entry_count(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Drop the entry for `token`, if any.
    pub fn invalidate(&self, token: &BearerToken) {
        self.entries.invalidate(&self.key_for(token));
    }

    /// Apply pending evictions and expirations.
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }

    fn key_for(&self, token: &BearerToken) -> String {
        self.hasher.digest_bytes(token.expose().as_bytes())
    }
}

impl ContextStore for ContextCache {
    fn lookup(&self, token: &BearerToken) -> Option<String> {
        match self.entries.get(&self.key_for(token)) {
            Some(entry) => {
                self.metrics.record_hit();
                Some(entry.context_id)
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    fn store(&self, token: &BearerToken, context_id: String, ttl: Duration) {
        tracing::debug!(context = %context_id, ttl_seconds = ttl.as_secs(), "caching context");
        self.entries.insert(self.key_for(token), ContextEntry { context_id, ttl });
    }
}

impl std::fmt::Debug for ContextCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextCache")
            .field("config", &self.config)
            .field("entry_count", &self.entries.entry_count())
            .finish_non_exhaustive()
    }
}
