//! Multi-cluster cache key

use clavis_common::hash;
use clavis_domain::{BearerToken, ListOptions, ResourceKind, Result};
use serde::Serialize;

use super::base::{serialization_error, BaseKey, KeyEnvelope};
use super::resolver::ContextResolver;

/// Cache key that is unique across clusters.
///
/// Owned by a single request. The bearer token is only ever used to look up
/// the context identifier; the digest covers the identifier, not the token.
#[derive(Debug, Clone)]
pub struct CacheKey {
    key: BaseKey,
    token: BearerToken,
    context: Option<String>,
}

#[derive(Debug, Serialize)]
struct ContextKeyEnvelope<'a> {
    key: KeyEnvelope<'a>,
    context: &'a str,
}

impl CacheKey {
    pub fn new(
        kind: ResourceKind,
        namespace: impl Into<String>,
        token: impl Into<BearerToken>,
        opts: ListOptions,
    ) -> Self {
        Self { key: BaseKey::new(kind, namespace, opts), token: token.into(), context: None }
    }

    pub fn base(&self) -> &BaseKey {
        &self.key
    }

    /// Context identifier resolved by the last successful [`CacheKey::digest`].
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Digest addressing the primary response cache.
    ///
    /// With cluster context disabled this is exactly the base key digest.
    /// Otherwise the token is resolved through `resolver` and the resulting
    /// context identifier is folded into the hashed envelope.
    ///
    /// # Errors
    /// - `ClavisError::Unauthorized`, `BadRequest` or `Network` when the
    ///   token exchange fails
    /// - `ClavisError::Serialization` if the envelope cannot be hashed
    pub async fn digest(&mut self, resolver: &ContextResolver) -> Result<String> {
        if !resolver.cluster_context_enabled() {
            return self.key.digest();
        }

        let context = resolver.resolve(&self.token).await?;
        let context: &str = self.context.insert(context);

        hash::digest(&ContextKeyEnvelope { key: self.key.envelope(), context })
            .map_err(serialization_error)
    }
}
