//! Bearer credential wrapper
//!
//! Provides a wrapper around the raw token string that never prints its
//! contents and zeroes memory on drop.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque bearer credential presented by the caller.
///
/// Deliberately not `Serialize`: the only way to reach the raw value is
/// [`BearerToken::expose`], so it cannot end up in a hashed envelope or a
/// structured log field by accident.
#[derive(Clone, PartialEq, Eq, Hash, Zeroize, ZeroizeOnDrop)]
pub struct BearerToken {
    inner: String,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self { inner: token.into() }
    }

    /// Expose the inner value (use with caution)
    ///
    /// # Security Warning
    /// The exposed value should not be stored or logged.
    /// Use only for the `Authorization` header and the context cache lookup.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<&str> for BearerToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for BearerToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken(***)")
    }
}

impl fmt::Display for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}
