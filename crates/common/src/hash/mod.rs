//! Canonical Hashing Module - Portable Core
//!
//! Deterministic digests over structured values. A value is first lowered
//! into a canonical JSON document (object keys sorted, no floating point)
//! and the resulting bytes are hashed into a lowercase hex string.

pub mod canonical;
pub mod error;
mod serializer;

// Re-export commonly used types
pub use canonical::{digest, CanonicalHasher};
pub use error::{HashError, HashResult};
