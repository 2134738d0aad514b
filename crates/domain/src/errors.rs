//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Clavis
///
/// Every failure aborts key derivation for the request that hit it. None of
/// them is ever written into the context cache.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ClavisError {
    /// A value could not be lowered into its canonical hashed form.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The token exchange endpoint rejected the bearer token (401/403).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The token exchange endpoint answered with an unexpected status.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The token exchange endpoint could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClavisError {
    /// Stable label suitable for metrics/logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "serialization",
            Self::Unauthorized(_) => "unauthorized",
            Self::BadRequest(_) => "bad_request",
            Self::Network(_) => "network",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the failure came from the token exchange round-trip.
    pub fn is_exchange_failure(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::BadRequest(_) | Self::Network(_))
    }
}

/// Result type alias for Clavis operations
pub type Result<T> = std::result::Result<T, ClavisError>;
