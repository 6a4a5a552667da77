//! Cache Module
//!
//! Provides a capacity-bounded in-memory cache with pluggable eviction.

mod policy;
mod recency;
mod size;
mod stats;
mod store;


// Re-export public types
pub use policy::{EvictionPolicy, LruPolicy, MruPolicy, NoOpPolicy, PolicyKind};
pub use recency::RecencyList;
pub use size::BufferSize;
pub use stats::CacheStats;
pub use store::Cache;

// == Public Constants ==
/// Capacity used when none is given
pub const DEFAULT_CAPACITY: usize = 64;
