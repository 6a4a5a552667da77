//! Eviction Policy Module
//!
//! Strategies that decide which entry leaves the cache and how a hit
//! reorders the remaining ones.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::RecencyList;
use crate::error::CacheError;

// == Eviction Policy ==
/// Pluggable ordering strategy for [`Cache`](crate::cache::Cache).
///
/// A policy owns no entries. It operates on the cache's [`RecencyList`],
/// whose front is the least recently touched entry and whose back is the
/// most recently touched one. New entries always enter at the back.
pub trait EvictionPolicy: fmt::Debug {
    /// Short lowercase name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Whether the cache should store entries at all.
    ///
    /// A policy returning false turns the cache into a pass-through.
    fn admits_entries(&self) -> bool {
        true
    }

    /// Removes and returns the next victim, or `None` if `entries` is empty.
    fn evict<V>(&self, entries: &mut RecencyList<V>) -> Option<(String, V)>;

    /// Records a hit on `key`. Returns false if the key is absent.
    fn record_access<V>(&self, entries: &mut RecencyList<V>, key: &str) -> bool;
}

// == No-Op Policy ==
/// Disables caching: nothing is stored, every lookup misses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpPolicy;

impl EvictionPolicy for NoOpPolicy {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn admits_entries(&self) -> bool {
        false
    }

    fn evict<V>(&self, _entries: &mut RecencyList<V>) -> Option<(String, V)> {
        None
    }

    fn record_access<V>(&self, _entries: &mut RecencyList<V>, _key: &str) -> bool {
        true
    }
}

// == LRU Policy ==
/// Least recently used: evicts the front, a hit moves the key to the back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LruPolicy;

impl EvictionPolicy for LruPolicy {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn evict<V>(&self, entries: &mut RecencyList<V>) -> Option<(String, V)> {
        entries.pop_front()
    }

    fn record_access<V>(&self, entries: &mut RecencyList<V>, key: &str) -> bool {
        entries.move_to_back(key)
    }
}

// == MRU Policy ==
/// Most recently used: evicts the back, a hit moves the key to the back.
///
/// Suits sequential scans where the entry just read is the one least likely
/// to be read again soon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MruPolicy;

impl EvictionPolicy for MruPolicy {
    fn name(&self) -> &'static str {
        "mru"
    }

    fn evict<V>(&self, entries: &mut RecencyList<V>) -> Option<(String, V)> {
        entries.pop_back()
    }

    fn record_access<V>(&self, entries: &mut RecencyList<V>, key: &str) -> bool {
        entries.move_to_back(key)
    }
}

// == Policy Kind ==
/// Runtime-selectable policy, used when the strategy comes from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// See [`NoOpPolicy`]
    NoOp,
    /// See [`LruPolicy`]
    #[default]
    Lru,
    /// See [`MruPolicy`]
    Mru,
}

impl PolicyKind {
    /// All policies, in the order the benchmark runs them.
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Lru, PolicyKind::Mru, PolicyKind::NoOp];
}

impl EvictionPolicy for PolicyKind {
    fn name(&self) -> &'static str {
        match self {
            PolicyKind::NoOp => NoOpPolicy.name(),
            PolicyKind::Lru => LruPolicy.name(),
            PolicyKind::Mru => MruPolicy.name(),
        }
    }

    fn admits_entries(&self) -> bool {
        match self {
            PolicyKind::NoOp => NoOpPolicy.admits_entries(),
            PolicyKind::Lru => LruPolicy.admits_entries(),
            PolicyKind::Mru => MruPolicy.admits_entries(),
        }
    }

    fn evict<V>(&self, entries: &mut RecencyList<V>) -> Option<(String, V)> {
        match self {
            PolicyKind::NoOp => NoOpPolicy.evict(entries),
            PolicyKind::Lru => LruPolicy.evict(entries),
            PolicyKind::Mru => MruPolicy.evict(entries),
        }
    }

    fn record_access<V>(&self, entries: &mut RecencyList<V>, key: &str) -> bool {
        match self {
            PolicyKind::NoOp => NoOpPolicy.record_access(entries, key),
            PolicyKind::Lru => LruPolicy.record_access(entries, key),
            PolicyKind::Mru => MruPolicy.record_access(entries, key),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "noop" | "none" | "disabled" => Ok(PolicyKind::NoOp),
            "lru" => Ok(PolicyKind::Lru),
            "mru" => Ok(PolicyKind::Mru),
            other => Err(CacheError::InvalidConfig(format!(
                "unknown eviction policy '{}' (expected lru, mru or none)",
                other
            ))),
        }
    }
}
