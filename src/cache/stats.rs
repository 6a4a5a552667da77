//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses, inserts, evictions and rejected puts.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found the key
    pub hits: u64,
    /// Lookups that did not find the key
    pub misses: u64,
    /// Entries stored by `put`
    pub inserts: u64,
    /// Entries removed by the eviction policy
    pub evictions: u64,
    /// `put` calls rejected because the key was already cached
    pub duplicates_rejected: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Records a lookup that did not find its key.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Insert ==
    /// Records an entry stored by `put`.
    pub fn record_insert(&mut self) {
        self.inserts += 1;
    }

    // == Record Eviction ==
    /// Records an entry removed by the eviction policy.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Duplicate ==
    /// Records a `put` rejected because its key was already cached.
    pub fn record_duplicate(&mut self) {
        self.duplicates_rejected += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }

    // == Reset ==
    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
