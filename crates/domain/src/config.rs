//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    DEFAULT_CACHE_ENABLED, DEFAULT_CACHE_REFRESH_DEBOUNCE_SECONDS, DEFAULT_CACHE_SIZE,
    DEFAULT_CACHE_TTL_SECONDS, DEFAULT_CLUSTER_CONTEXT_ENABLED,
};
use crate::errors::{ClavisError, Result};

/// Client cache settings
///
/// Read-only once loaded. `cache_refresh_debounce_seconds` is advisory: the
/// context cache never consults it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub cache_enabled: bool,
    pub cluster_context_enabled: bool,
    pub token_exchange_endpoint: Option<String>,
    pub cache_size: u64,
    pub cache_ttl_seconds: u64,
    pub cache_refresh_debounce_seconds: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            cache_enabled: DEFAULT_CACHE_ENABLED,
            cluster_context_enabled: DEFAULT_CLUSTER_CONTEXT_ENABLED,
            token_exchange_endpoint: None,
            cache_size: DEFAULT_CACHE_SIZE,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            cache_refresh_debounce_seconds: DEFAULT_CACHE_REFRESH_DEBOUNCE_SECONDS,
        }
    }
}

impl CacheSettings {
    /// Settings with cluster context resolution switched on.
    pub fn with_cluster_context(endpoint: impl Into<String>) -> Self {
        Self {
            cluster_context_enabled: true,
            token_exchange_endpoint: Some(endpoint.into()),
            ..Self::default()
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn cache_refresh_debounce(&self) -> Duration {
        Duration::from_secs(self.cache_refresh_debounce_seconds)
    }

    /// Configured exchange endpoint, treating an empty string as unset.
    pub fn token_exchange_endpoint(&self) -> Option<&str> {
        self.token_exchange_endpoint.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Validate cross-field invariants.
    ///
    /// # Errors
    /// Returns `ClavisError::Config` if:
    /// - cluster context is enabled without a token exchange endpoint
    /// - the endpoint is not an absolute http(s) URL
    /// - `cache_size` is zero
    pub fn ensure(&self) -> Result<()> {
        if self.cache_size == 0 {
            return Err(ClavisError::Config("cache-size must be a positive integer".into()));
        }

        match self.token_exchange_endpoint() {
            None if self.cluster_context_enabled => Err(ClavisError::Config(
                "token-exchange-endpoint must be set when cluster-context-enabled is set to true"
                    .into(),
            )),
            None => Ok(()),
            Some(endpoint) => {
                let url = Url::parse(endpoint).map_err(|e| {
                    ClavisError::Config(format!("Invalid token-exchange-endpoint: {e}"))
                })?;
                match url.scheme() {
                    "http" | "https" => Ok(()),
                    other => Err(ClavisError::Config(format!(
                        "Unsupported token-exchange-endpoint scheme: {other}"
                    ))),
                }
            }
        }
    }
}
