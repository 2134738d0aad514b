//! Process-wide key derivation context
//!
//! Wires settings, the shared context cache, the token exchanger and the
//! refresh debouncer together. Built once at startup; request handlers share
//! it behind an `Arc`.

use std::sync::Arc;

use clavis_core::{CacheKey, ContextResolver};
use clavis_domain::{BearerToken, CacheSettings, ListOptions, ResourceKind, Result};
use tracing::info;

use crate::auth::HttpTokenExchanger;
use crate::cache::{ContextCache, ContextCacheConfig, RefreshDebouncer};
use crate::config;
use crate::http::HttpClient;
use crate::observability::metrics::ContextCacheMetrics;

/// Shared state for cache key derivation.
#[derive(Debug)]
pub struct ClavisContext {
    resolver: ContextResolver,
    cache: Arc<ContextCache>,
    debouncer: RefreshDebouncer,
    metrics: Arc<ContextCacheMetrics>,
}

impl ClavisContext {
    /// Build the context from validated settings.
    ///
    /// # Errors
    /// Returns `ClavisError::Config` when the settings are inconsistent
    /// (e.g. cluster context enabled without an exchange endpoint). Callers
    /// are expected to abort startup on this error.
    pub fn initialize(settings: CacheSettings) -> Result<Self> {
        Self::with_http_client(settings, HttpClient::new()?)
    }

    /// Same as [`ClavisContext::initialize`] with a caller supplied client.
    pub fn with_http_client(settings: CacheSettings, client: HttpClient) -> Result<Self> {
        settings.ensure()?;

        let metrics = Arc::new(ContextCacheMetrics::new());
        let cache =
            Arc::new(ContextCache::with_metrics(ContextCacheConfig::from(&settings), metrics.clone()));
        let exchanger = Arc::new(HttpTokenExchanger::with_metrics(client, metrics.clone()));
        let debouncer = RefreshDebouncer::from_settings(&settings);

        info!(
            cache_enabled = settings.cache_enabled,
            cluster_context_enabled = settings.cluster_context_enabled,
            cache_size = settings.cache_size,
            cache_ttl_seconds = settings.cache_ttl_seconds,
            "clavis context initialized"
        );

        let resolver = ContextResolver::new(settings, cache.clone(), exchanger)?;
        Ok(Self { resolver, cache, debouncer, metrics })
    }

    /// Load settings through [`config::load`] and initialize.
    pub fn from_config() -> Result<Self> {
        Self::initialize(config::load()?)
    }

    pub fn settings(&self) -> &CacheSettings {
        self.resolver.settings()
    }

    pub fn resolver(&self) -> &ContextResolver {
        &self.resolver
    }

    pub fn cache(&self) -> &Arc<ContextCache> {
        &self.cache
    }

    pub fn debouncer(&self) -> &RefreshDebouncer {
        &self.debouncer
    }

    pub fn metrics(&self) -> &Arc<ContextCacheMetrics> {
        &self.metrics
    }

    /// Primary cache key for a list request.
    ///
    /// `Ok(None)` when response caching is disabled. Otherwise the composite
    /// key digest, which equals the base key digest unless cluster context
    /// is enabled.
    ///
    /// # Errors
    /// Propagates token exchange failures; nothing is cached for them.
    pub async fn derive_key(
        &self,
        kind: ResourceKind,
        namespace: &str,
        token: impl Into<BearerToken>,
        opts: ListOptions,
    ) -> Result<Option<String>> {
        if !self.settings().cache_enabled {
            return Ok(None);
        }

        let mut key = CacheKey::new(kind, namespace, token, opts);
        key.digest(&self.resolver).await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use clavis_domain::ClavisError;

    use super::*;

    #[test]
    fn test_initialize_rejects_missing_endpoint() {
        let settings = CacheSettings { cluster_context_enabled: true, ..CacheSettings::default() };
        let result = ClavisContext::initialize(settings);
        assert!(matches!(result, Err(ClavisError::Config(_))));
    }

    #[tokio::test]
    async fn test_disabled_cache_yields_no_key() {
        let settings = CacheSettings { cache_enabled: false, ..CacheSettings::default() };
        let context = ClavisContext::initialize(settings).unwrap();

        let key = context
            .derive_key(ResourceKind::Pod, "default", "abc", ListOptions::default())
            .await
            .unwrap();

        assert_eq!(key, None);
    }

    #[tokio::test]
    async fn test_single_cluster_key_matches_known_digest() {
        let context = ClavisContext::initialize(CacheSettings::default()).unwrap();

        let key = context
            .derive_key(
                ResourceKind::Pod,
                "default",
                "abc",
                ListOptions::default().with_label_selector("app=web"),
            )
            .await
            .unwrap();

        assert_eq!(
            key.as_deref(),
            Some("9a9cf98d48577ffe3f41ebc9acbf5bdbf6baf74aea9db4b072df26e0290eb3b0")
        );
        assert_eq!(context.metrics().snapshot().exchanges, 0);
    }
}
