//! Application constants
//!
//! Defaults for the cache settings, matching the documented flag defaults.

pub const DEFAULT_CACHE_ENABLED: bool = true;
pub const DEFAULT_CLUSTER_CONTEXT_ENABLED: bool = false;
pub const DEFAULT_CACHE_SIZE: u64 = 1000;
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 10 * 60;
pub const DEFAULT_CACHE_REFRESH_DEBOUNCE_SECONDS: u64 = 5;
