//! Observability infrastructure for metrics and logging
//!
//! - Lock-free counters for the context cache and token exchanges
//! - `tracing` subscriber bootstrap honouring `RUST_LOG`

pub mod metrics;

use clavis_domain::{ClavisError, Result};
use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(default_filter: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .map_err(|e| ClavisError::Internal(format!("Failed to initialize tracing: {e}")))
}
