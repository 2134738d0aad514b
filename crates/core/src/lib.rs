//! # Clavis Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Cache key value objects and their digests
//! - Context resolution (cache lookup, token exchange, cache store)
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `clavis-common` and `clavis-domain`
//! - No HTTP or cache-store code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod cache_key;

// Re-export specific items to avoid ambiguity
pub use cache_key::ports::{ContextStore, TokenExchanger};
pub use cache_key::{BaseKey, CacheKey, ContextResolver};
