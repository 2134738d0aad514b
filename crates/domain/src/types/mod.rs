//! Domain types and models
//!
//! Request-scoped inputs to cache key derivation.

pub mod list_options;
pub mod resource;
pub mod token;

pub use list_options::{ListOptions, SelectorOptions};
pub use resource::ResourceKind;
pub use token::BearerToken;
