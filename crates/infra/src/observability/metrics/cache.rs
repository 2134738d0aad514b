//! Context cache metrics
//!
//! Tracks context cache hit/miss rates and the outcome of token exchanges.
//!
//! ## Design
//! - **SeqCst ordering** for atomics used in hit_rate calculation (derived metric)
//! - **No locking needed** - simple atomic counters

use std::sync::atomic::{AtomicUsize, Ordering};

use clavis_domain::ClavisError;

/// Counters shared by the context cache and the token exchanger.
#[derive(Debug, Default)]
pub struct ContextCacheMetrics {
    /// Lookups answered from the cache
    pub cache_hits: AtomicUsize,
    /// Lookups that found nothing (or only an expired entry)
    pub cache_misses: AtomicUsize,
    /// Successful token exchanges
    pub exchanges: AtomicUsize,
    /// Exchanges rejected with 401/403
    pub unauthorized: AtomicUsize,
    /// Exchanges answered with an unexpected status
    pub bad_requests: AtomicUsize,
    /// Exchanges that never got a response
    pub network_failures: AtomicUsize,
}

/// Point-in-time copy of [`ContextCacheMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub cache_hits: usize,
    pub cache_misses: usize,
    pub exchanges: usize,
    pub unauthorized: usize,
    pub bad_requests: usize,
    pub network_failures: usize,
}

impl ContextCacheMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        // SeqCst for consistency with get_hit_rate calculation
        self.cache_hits.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_miss(&self) {
        // SeqCst for consistency with get_hit_rate calculation
        self.cache_misses.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_exchange(&self) {
        self.exchanges.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a failed exchange under its error class.
    pub fn record_exchange_failure(&self, error: &ClavisError) {
        let counter = match error {
            ClavisError::Unauthorized(_) => &self.unauthorized,
            ClavisError::BadRequest(_) => &self.bad_requests,
            ClavisError::Network(_) => &self.network_failures,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Cache hit rate as a percentage (0.0 to 100.0)
    ///
    /// Returns 0.0 if no lookups have been recorded.
    pub fn get_hit_rate(&self) -> f64 {
        // SeqCst for consistent snapshot of both counters
        let hits = self.cache_hits.load(Ordering::SeqCst);
        let misses = self.cache_misses.load(Ordering::SeqCst);

        let total = hits + misses;
        if total == 0 {
            return 0.0;
        }

        (hits as f64 / total as f64) * 100.0
    }

    pub fn snapshot(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::SeqCst),
            cache_misses: self.cache_misses.load(Ordering::SeqCst),
            exchanges: self.exchanges.load(Ordering::Relaxed),
            unauthorized: self.unauthorized.load(Ordering::Relaxed),
            bad_requests: self.bad_requests.load(Ordering::Relaxed),
            network_failures: self.network_failures.load(Ordering::Relaxed),
        }
    }
}
