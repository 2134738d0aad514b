//! Metrics collection modules
//!
//! Thread-safe metrics for the context cache.

pub mod cache;

// Re-export metric types for convenience
pub use cache::{CacheMetricsSnapshot, ContextCacheMetrics};
