//! # Clavis Domain
//!
//! Domain types and models for Clavis.
//!
//! This crate contains:
//! - Resource addressing types (ResourceKind, ListOptions, BearerToken)
//! - Domain error types and Result definitions
//! - Cache settings
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Clavis crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
