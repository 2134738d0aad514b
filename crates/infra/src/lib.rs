//! # Clavis Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The moka backed context cache and refresh debouncer
//! - The HTTP token exchanger
//! - Settings loading from environment and files
//! - Tracing bootstrap and cache metrics
//!
//! ## Architecture
//! - Implements traits defined in `clavis-core`
//! - Contains all "impure" code (network, clocks, environment)

pub mod auth;
pub mod cache;
pub mod config;
pub mod context;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use auth::HttpTokenExchanger;
pub use cache::{ContextCache, ContextCacheConfig, RefreshDebouncer};
pub use context::ClavisContext;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::init_tracing;
pub use observability::metrics::{CacheMetricsSnapshot, ContextCacheMetrics};
