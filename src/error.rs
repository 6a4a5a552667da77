//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// A lookup miss is never an error; `Cache::get` reports it as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// `put` was called with a key that is already cached
    #[error("Key {0} already exists in cache, aborting insertion")]
    DuplicateKey(String),

    /// Eviction was requested while nothing is cached
    #[error("Cannot evict from an empty cache")]
    EmptyCache,

    /// An access was recorded for a key that is not cached
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Construction or environment configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Tables being combined do not share a column layout
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
