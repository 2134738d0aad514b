//! Context resolution
//!
//! Looks up the context identifier for a bearer token, exchanging the token
//! upstream on a cache miss. Concurrent misses for the same token may both
//! reach the exchanger; the last store wins.

use std::sync::Arc;
use std::time::Duration;

use clavis_domain::{BearerToken, CacheSettings, ClavisError, Result};
use tracing::{debug, warn};

use super::ports::{ContextStore, TokenExchanger};

/// Resolves bearer tokens into context identifiers through a shared cache.
pub struct ContextResolver {
    settings: CacheSettings,
    store: Arc<dyn ContextStore>,
    exchanger: Arc<dyn TokenExchanger>,
}

impl ContextResolver {
    /// Create a resolver after validating `settings`.
    ///
    /// # Errors
    /// Returns `ClavisError::Config` when the settings are inconsistent, e.g.
    /// cluster context enabled without an exchange endpoint.
    pub fn new(
        settings: CacheSettings,
        store: Arc<dyn ContextStore>,
        exchanger: Arc<dyn TokenExchanger>,
    ) -> Result<Self> {
        settings.ensure()?;
        Ok(Self { settings, store, exchanger })
    }

    pub fn cluster_context_enabled(&self) -> bool {
        self.settings.cluster_context_enabled
    }

    pub fn cache_ttl(&self) -> Duration {
        self.settings.cache_ttl()
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Context identifier for `token`.
    ///
    /// A cache hit never touches the network. On a miss the token is
    /// exchanged and the result stored for the configured TTL. Failed
    /// exchanges are propagated and never cached.
    pub async fn resolve(&self, token: &BearerToken) -> Result<String> {
        if let Some(context) = self.store.lookup(token) {
            debug!(context = %context, "context cache hit");
            return Ok(context);
        }

        let endpoint = self.settings.token_exchange_endpoint().ok_or_else(|| {
            ClavisError::Config("token-exchange-endpoint is not configured".into())
        })?;

        debug!(url = %endpoint, "context cache miss, exchanging token");
        let context = match self.exchanger.exchange(endpoint, token).await {
            Ok(context) => context,
            Err(err) => {
                warn!(url = %endpoint, error = %err, kind = err.label(), "token exchange failed");
                return Err(err);
            }
        };

        self.store.store(token, context.clone(), self.cache_ttl());
        Ok(context)
    }
}

impl std::fmt::Debug for ContextResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextResolver").field("settings", &self.settings).finish_non_exhaustive()
    }
}
