//! Cache Store Module
//!
//! Capacity-bounded container whose eviction order is delegated to an
//! [`EvictionPolicy`].

use tracing::{debug, trace};

use crate::cache::{
    BufferSize, CacheStats, EvictionPolicy, PolicyKind, RecencyList, DEFAULT_CAPACITY,
};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Cache ==
/// Bounded key-value cache with a pluggable eviction policy.
///
/// Keys are unique: `put` never replaces an existing entry. After every
/// public call the number of entries is at most `capacity`.
///
/// The cache is single-threaded. Wrap it in an external lock to share it.
#[derive(Debug)]
pub struct Cache<V, P: EvictionPolicy> {
    /// Entries ordered from least to most recently touched
    entries: RecencyList<V>,
    /// Ordering strategy
    policy: P,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<V, P: EvictionPolicy> Cache<V, P> {
    // == Constructor ==
    /// Creates a new cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// `InvalidConfig` if `capacity` is zero.
    pub fn new(capacity: usize, policy: P) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "cache capacity must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            entries: RecencyList::with_capacity(capacity),
            policy,
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Creates a new cache with [`DEFAULT_CAPACITY`].
    pub fn with_policy(policy: P) -> Self {
        Self {
            entries: RecencyList::with_capacity(DEFAULT_CAPACITY),
            policy,
            stats: CacheStats::new(),
            capacity: DEFAULT_CAPACITY,
        }
    }

    // == Get ==
    /// Retrieves a cached value.
    ///
    /// On a hit the policy records the access. A miss returns `None` and
    /// leaves the ordering untouched.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        if !self.entries.contains(key) {
            trace!(key, "cache miss");
            self.stats.record_miss();
            return None;
        }

        // Present, so recording the access cannot fail
        self.policy.record_access(&mut self.entries, key);
        self.stats.record_hit();
        trace!(key, "cache hit");
        self.entries.get(key)
    }

    // == Peek ==
    /// Looks up a value without recording an access or touching stats.
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    // == Put ==
    /// Inserts a new entry at the most recently touched end.
    ///
    /// If the cache is full, exactly one entry chosen by the policy is evicted
    /// before the new one goes in. A policy that does not admit entries makes
    /// this a no-op.
    ///
    /// # Errors
    /// `DuplicateKey` if `key` is already cached; the cache is left unchanged.
    pub fn put(&mut self, key: impl Into<String>, value: V) -> Result<()> {
        if !self.policy.admits_entries() {
            return Ok(());
        }

        let key = key.into();
        if self.entries.contains(&key) {
            debug!(key = %key, "rejecting duplicate cache insert");
            self.stats.record_duplicate();
            return Err(CacheError::DuplicateKey(key));
        }

        // Make room first so the policy never picks the entry being inserted
        if self.entries.len() >= self.capacity {
            self.remove_from_cache()?;
        }

        self.entries.push_back(key, value);
        self.stats.record_insert();

        self.stats.set_total_entries(self.entries.len());
        Ok(())
    }

    // == Remove From Cache ==
    /// Evicts one entry chosen by the policy and returns it.
    ///
    /// `put` calls this when the cache is full; it is public so new
    /// policies can be exercised directly. Returns `Ok(None)` for a policy
    /// that does not admit entries.
    ///
    /// # Errors
    /// `EmptyCache` if nothing is cached.
    pub fn remove_from_cache(&mut self) -> Result<Option<(String, V)>> {
        if !self.policy.admits_entries() {
            return Ok(None);
        }

        let (key, value) = self
            .policy
            .evict(&mut self.entries)
            .ok_or(CacheError::EmptyCache)?;

        debug!(key = %key, policy = self.policy.name(), "evicted cache entry");
        self.stats.record_eviction();
        self.stats.set_total_entries(self.entries.len());
        Ok(Some((key, value)))
    }

    // == Cache Policy ==
    /// Records an access to `key` so later evictions respect the policy.
    ///
    /// `get` calls this on every hit. A no-op for a policy that does not
    /// admit entries.
    ///
    /// # Errors
    /// `KeyNotFound` if `key` is not cached.
    pub fn cache_policy(&mut self, key: &str) -> Result<()> {
        if !self.policy.admits_entries() {
            return Ok(());
        }

        if self.policy.record_access(&mut self.entries, key) {
            Ok(())
        } else {
            Err(CacheError::KeyNotFound(key.to_string()))
        }
    }

    // == Clear ==
    /// Removes every entry and resets statistics. Never fails.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.reset();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Capacity ==
    /// Returns the maximum number of entries, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Contains ==
    /// Checks for a key without recording an access.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    // == Keys ==
    /// Keys from least to most recently touched.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys()
    }

    // == Policy ==
    /// Returns the eviction policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    // == Policy Name ==
    /// Returns the policy's short name, e.g. `"lru"`.
    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }
}

impl<V: BufferSize, P: EvictionPolicy> Cache<V, P> {
    // == Cache Byte Size ==
    /// Sums the total buffer size of every cached value.
    ///
    /// This walks all entries on each call.
    pub fn cache_byte_size(&self) -> u64 {
        self.entries
            .values()
            .map(BufferSize::total_buffer_size)
            .sum()
    }
}

impl<V> Cache<V, PolicyKind> {
    /// Creates a cache from runtime configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.capacity, config.policy)
    }
}
