//! Shared test helpers for `clavis-core` integration tests.
//!
//! In-memory implementations of the context ports so that key derivation
//! tests can focus on behaviour instead of boilerplate.

pub mod ports;
