//! In-memory caches backed by moka

pub mod context_cache;
pub mod debounce;

pub use context_cache::{ContextCache, ContextCacheConfig};
pub use debounce::RefreshDebouncer;
