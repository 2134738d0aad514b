//! Cache key derivation
//!
//! A [`BaseKey`] addresses a cached list response inside a single cluster.
//! A [`CacheKey`] extends it with the context identifier behind the caller's
//! bearer token so that the same query against different clusters lands on
//! different cache entries.

pub mod base;
pub mod composite;
pub mod ports;
pub mod resolver;

pub use base::BaseKey;
pub use composite::CacheKey;
pub use resolver::ContextResolver;
