//! Integration Tests for the public cache API
//!
//! Drives the cache the way a table-scan caller does: construct with a
//! policy, put loaded artifacts, get before recomputing, measure, clear.

use std::sync::Arc;

use scan_cache::cache::{BufferSize, CacheStats, DEFAULT_CAPACITY};
use scan_cache::config::CacheConfig;
use scan_cache::scan::{RowFilter, SyntheticTable, Table};
use scan_cache::{Cache, CacheError, EvictionPolicy, LruPolicy, MruPolicy, NoOpPolicy, PolicyKind};

// == Helper Types ==

/// Artifact with a fixed reported size.
#[derive(Debug, Clone, PartialEq)]
struct Page {
    bytes: u64,
}

impl BufferSize for Page {
    fn total_buffer_size(&self) -> u64 {
        self.bytes
    }
}

fn page(bytes: u64) -> Page {
    Page { bytes }
}

fn sorted_keys<V, P: EvictionPolicy>(cache: &Cache<V, P>) -> Vec<String> {
    let mut keys: Vec<String> = cache.keys().map(str::to_string).collect();
    keys.sort();
    keys
}

// == Eviction Order ==

#[test]
fn test_lru_evicts_least_recently_used() {
    let mut cache = Cache::new(2, LruPolicy).unwrap();

    cache.put("a", page(1)).unwrap();
    cache.put("b", page(2)).unwrap();
    assert_eq!(cache.get("a"), Some(&page(1)));
    cache.put("c", page(3)).unwrap();

    assert_eq!(sorted_keys(&cache), vec!["a", "c"]);
    assert_eq!(cache.get("b"), None);
}

#[test]
fn test_mru_evicts_most_recently_used() {
    let mut cache = Cache::new(2, MruPolicy).unwrap();

    cache.put("a", page(1)).unwrap();
    cache.put("b", page(2)).unwrap();
    assert_eq!(cache.get("b"), Some(&page(2)));
    cache.put("c", page(3)).unwrap();

    assert_eq!(sorted_keys(&cache), vec!["a", "c"]);
    assert_eq!(cache.get("b"), None);
}

#[test]
fn test_mru_full_cache_admits_new_key() {
    let mut cache = Cache::new(2, MruPolicy).unwrap();

    cache.put("a", page(1)).unwrap();
    cache.put("b", page(2)).unwrap();
    cache.put("c", page(3)).unwrap();

    assert_eq!(cache.get("c"), Some(&page(3)));
    assert_eq!(sorted_keys(&cache), vec!["a", "c"]);
    assert_eq!(cache.cache_byte_size(), 4);
}

#[test]
fn test_runtime_policy_matches_static_policy() {
    let mut dynamic = Cache::new(3, PolicyKind::Lru).unwrap();
    let mut fixed = Cache::new(3, LruPolicy).unwrap();

    for (i, key) in ["a", "b", "c", "d", "e"].iter().enumerate() {
        dynamic.put(*key, page(i as u64)).unwrap();
        fixed.put(*key, page(i as u64)).unwrap();
        dynamic.get("a");
        fixed.get("a");
    }

    assert_eq!(
        dynamic.keys().collect::<Vec<_>>(),
        fixed.keys().collect::<Vec<_>>()
    );
}

// == Contract ==

#[test]
fn test_duplicate_put_leaves_state_unchanged() {
    let mut cache = Cache::new(4, LruPolicy).unwrap();
    cache.put("k", page(10)).unwrap();
    cache.put("other", page(5)).unwrap();

    let err = cache.put("k", page(99)).unwrap_err();

    assert_eq!(err, CacheError::DuplicateKey("k".to_string()));
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.cache_byte_size(), 15);
    assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["k", "other"]);
}

#[test]
fn test_internal_hooks_report_misuse() {
    let mut cache: Cache<Page, MruPolicy> = Cache::new(4, MruPolicy).unwrap();

    assert_eq!(cache.remove_from_cache(), Err(CacheError::EmptyCache));
    assert_eq!(
        cache.cache_policy("ghost"),
        Err(CacheError::KeyNotFound("ghost".to_string()))
    );
}

#[test]
fn test_default_capacity() {
    let mut cache = Cache::with_policy(LruPolicy);
    assert_eq!(cache.capacity(), 64);
    assert_eq!(DEFAULT_CAPACITY, 64);

    for i in 0..100 {
        cache.put(format!("file-{}", i), page(1)).unwrap();
    }
    assert_eq!(cache.len(), 64);
    assert!(!cache.contains("file-35"));
    assert!(cache.contains("file-36"));
}

#[test]
fn test_from_config_rejects_zero_capacity() {
    let config = CacheConfig {
        capacity: 0,
        policy: PolicyKind::Mru,
    };
    let result: Result<Cache<Page, PolicyKind>, _> = Cache::from_config(&config);
    assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
}

// == Size Accounting and Clear ==

#[test]
fn test_byte_size_tracks_evictions() {
    let mut cache = Cache::new(2, LruPolicy).unwrap();
    assert_eq!(cache.cache_byte_size(), 0);

    cache.put("a", page(100)).unwrap();
    cache.put("b", page(20)).unwrap();
    assert_eq!(cache.cache_byte_size(), 120);

    cache.put("c", page(3)).unwrap();
    assert_eq!(cache.cache_byte_size(), 23);
}

#[test]
fn test_clear_is_idempotent() {
    let mut cache = Cache::new(4, MruPolicy).unwrap();

    cache.clear();
    assert_eq!(cache.len(), 0);

    cache.put("a", page(1)).unwrap();
    cache.clear();
    cache.clear();

    assert_eq!(cache.len(), 0);
    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.cache_byte_size(), 0);
}

#[test]
fn test_noop_cache_is_transparent() {
    let mut cache = Cache::new(4, NoOpPolicy).unwrap();

    for i in 0..10 {
        cache.put(format!("k{}", i), page(50)).unwrap();
        cache.put(format!("k{}", i), page(50)).unwrap();
    }

    assert_eq!(cache.cache_byte_size(), 0);
    assert_eq!(cache.get("k0"), None);
    assert_eq!(cache.stats().inserts, 0);
}

// == Scan Caller ==

#[test]
fn test_scan_reuses_cached_files() {
    let table = SyntheticTable::generate("db.trips", 6, 16);
    let mut cache: Cache<Arc<Table>, PolicyKind> = Cache::new(4, PolicyKind::Lru).unwrap();

    let first = table.scan(RowFilter::AlwaysTrue).to_table(&mut cache).unwrap();
    let second = table.scan(RowFilter::AlwaysTrue).to_table(&mut cache).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.num_rows(), 96);
    assert_eq!(cache.len(), 4);
    assert_eq!(cache.cache_byte_size(), 4 * 16 * 3 * 8);

    cache.clear();
    assert_eq!(cache.stats(), CacheStats::new());
}
