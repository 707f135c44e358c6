//! Error types for accessors and configuration.

use thiserror::Error;

/// Returned by the reference-returning accessors (`at`, `at_mut`) when the
/// key has no entry. Lookups that return `Option`/`bool` never produce it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("key not found")]
pub struct KeyNotFound;

/// Rejected `MapConfig` values.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("initial bucket count must be at least 1")]
    ZeroBuckets,

    #[error("max load factor must be finite and at least 1/64, got {0}")]
    InvalidLoadFactor(f64),
}
