//! Configuration Module
//!
//! Handles loading cache and benchmark configuration from environment variables.

use std::env;
use std::str::FromStr;

use serde::Serialize;

use crate::cache::{PolicyKind, DEFAULT_CAPACITY};
use crate::error::{CacheError, Result};

// == Cache Config ==
/// Construction options for a single cache instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheConfig {
    /// Maximum number of entries before eviction triggers
    pub capacity: usize,
    /// Eviction policy, fixed for the cache's lifetime
    pub policy: PolicyKind,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            policy: PolicyKind::Lru,
        }
    }
}

// == Bench Config ==
/// Parameters of the scan benchmark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchConfig {
    /// Scans per (policy, filter) pair
    pub iterations: usize,
    /// Number of synthetic data files in the table
    pub files: usize,
    /// Rows in each data file
    pub rows_per_file: usize,
    /// Policies to compare, in run order
    pub policies: Vec<PolicyKind>,
    /// Row filter expressions, in run order
    pub filters: Vec<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 10,
            files: 16,
            rows_per_file: 1024,
            policies: PolicyKind::ALL.to_vec(),
            filters: vec![
                "True".to_string(),
                "passenger_count == 7".to_string(),
                "False".to_string(),
            ],
        }
    }
}

// == Config ==
/// Full application configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    pub cache: CacheConfig,
    pub bench: BenchConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 64)
    /// - `CACHE_POLICY` - Policy for single-cache use: lru, mru or none (default: lru)
    /// - `BENCH_ITERATIONS` - Scans per policy and filter (default: 10)
    /// - `BENCH_FILES` - Synthetic data files per table (default: 16)
    /// - `BENCH_ROWS_PER_FILE` - Rows per data file (default: 1024)
    /// - `BENCH_POLICIES` - Comma separated policies to compare (default: lru,mru,none)
    /// - `BENCH_FILTERS` - Semicolon separated row filters (default: True;passenger_count == 7;False)
    ///
    /// Unset variables fall back to defaults; set but unparsable ones are errors.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let policies = match lookup("BENCH_POLICIES") {
            Some(raw) => raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(PolicyKind::from_str)
                .collect::<Result<Vec<_>>>()?,
            None => defaults.bench.policies,
        };

        let filters = match lookup("BENCH_FILTERS") {
            Some(raw) => raw
                .split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.bench.filters,
        };

        let config = Self {
            cache: CacheConfig {
                capacity: parse_var(&lookup, "CACHE_CAPACITY", defaults.cache.capacity)?,
                policy: parse_var(&lookup, "CACHE_POLICY", defaults.cache.policy)?,
            },
            bench: BenchConfig {
                iterations: parse_var(&lookup, "BENCH_ITERATIONS", defaults.bench.iterations)?,
                files: parse_var(&lookup, "BENCH_FILES", defaults.bench.files)?,
                rows_per_file: parse_var(
                    &lookup,
                    "BENCH_ROWS_PER_FILE",
                    defaults.bench.rows_per_file,
                )?,
                policies,
                filters,
            },
        };

        config.validate()?;
        Ok(config)
    }

    // == Validate ==
    /// Rejects values the cache or benchmark cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.cache.capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "CACHE_CAPACITY must be a positive integer".to_string(),
            ));
        }
        if self.bench.iterations == 0 {
            return Err(CacheError::InvalidConfig(
                "BENCH_ITERATIONS must be a positive integer".to_string(),
            ));
        }
        if self.bench.files == 0 {
            return Err(CacheError::InvalidConfig(
                "BENCH_FILES must be a positive integer".to_string(),
            ));
        }
        if self.bench.policies.is_empty() {
            return Err(CacheError::InvalidConfig(
                "BENCH_POLICIES must name at least one policy".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            CacheError::InvalidConfig(format!("{} has invalid value '{}'", name, raw))
        }),
        None => Ok(default),
    }
}
