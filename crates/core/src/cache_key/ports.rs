//! Port interfaces for context resolution
//!
//! These traits define the boundaries between key derivation and the
//! infrastructure that caches and exchanges bearer tokens.

use std::time::Duration;

use async_trait::async_trait;
use clavis_domain::{BearerToken, Result};

/// Trait for the bounded token → context identifier cache
///
/// Implementations must be safe for concurrent use and linearizable per
/// token. Expired entries must never be returned from `lookup`.
pub trait ContextStore: Send + Sync {
    /// Cached context identifier for `token`, if present and not expired.
    /// Never performs network I/O.
    fn lookup(&self, token: &BearerToken) -> Option<String>;

    /// Insert or refresh an entry that expires after `ttl`.
    fn store(&self, token: &BearerToken, context_id: String, ttl: Duration);
}

/// Trait for exchanging a bearer token for a context identifier
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Resolve `token` against `endpoint`.
    ///
    /// No retries are performed; callers own retry policy.
    async fn exchange(&self, endpoint: &str, token: &BearerToken) -> Result<String>;
}
