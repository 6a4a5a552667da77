//! Scan Cache - a capacity-bounded in-memory artifact cache
//!
//! Holds recently materialized tables keyed by file path, with pluggable
//! LRU, MRU or disabled eviction, plus a scan benchmark that compares them.

pub mod bench;
pub mod cache;
pub mod config;
pub mod error;
pub mod scan;

pub use cache::{Cache, EvictionPolicy, LruPolicy, MruPolicy, NoOpPolicy, PolicyKind};
pub use config::Config;
pub use error::{CacheError, Result};
