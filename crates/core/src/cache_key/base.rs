//! Single-cluster cache key

use clavis_common::hash::{self, HashError};
use clavis_domain::{ClavisError, ListOptions, ResourceKind, Result, SelectorOptions};
use serde::Serialize;

/// Hashable unit addressing a cached list response within one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseKey {
    kind: ResourceKind,
    namespace: String,
    opts: ListOptions,
}

/// Serialized form of a [`BaseKey`].
///
/// `opts` is the fixed selector projection, never the caller's full options.
#[derive(Debug, Serialize)]
pub(crate) struct KeyEnvelope<'a> {
    kind: ResourceKind,
    namespace: &'a str,
    opts: SelectorOptions,
}

impl BaseKey {
    pub fn new(kind: ResourceKind, namespace: impl Into<String>, opts: ListOptions) -> Self {
        Self { kind, namespace: namespace.into(), opts }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn opts(&self) -> &ListOptions {
        &self.opts
    }

    pub(crate) fn envelope(&self) -> KeyEnvelope<'_> {
        KeyEnvelope { kind: self.kind, namespace: &self.namespace, opts: self.opts.selectors() }
    }

    /// Digest over `(kind, namespace, labelSelector, fieldSelector)`.
    ///
    /// Pure; never performs I/O.
    ///
    /// # Errors
    /// Returns `ClavisError::Serialization` if the envelope cannot be hashed.
    pub fn digest(&self) -> Result<String> {
        hash::digest(&self.envelope()).map_err(serialization_error)
    }
}

pub(crate) fn serialization_error(err: HashError) -> ClavisError {
    ClavisError::Serialization(err.to_string())
}
