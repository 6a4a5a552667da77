//! Report DTOs for the scan benchmark
//!
//! Defines the structure of the JSON the binary prints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{CacheStats, PolicyKind};

/// Outcome of one (policy, filter) pair.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    /// Eviction policy of the cache under test
    pub policy: PolicyKind,
    /// Row filter as written in the configuration
    pub filter: String,
    /// Number of scans averaged
    pub iterations: usize,
    /// Mean wall time of one scan, in seconds
    pub mean_seconds: f64,
    /// Rows returned by the last scan
    pub rows: usize,
    /// Bytes held by the cache after the last scan
    pub cache_bytes: u64,
    /// Cache activity across all iterations
    pub stats: CacheStats,
}

/// Full benchmark output.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub generated_at: DateTime<Utc>,
    pub table: String,
    pub capacity: usize,
    pub files: usize,
    pub rows_per_file: usize,
    pub runs: Vec<RunResult>,
}

impl BenchReport {
    /// Creates an empty report stamped with the current time.
    pub fn new(table: impl Into<String>, capacity: usize, files: usize, rows_per_file: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            table: table.into(),
            capacity,
            files,
            rows_per_file,
            runs: Vec::new(),
        }
    }

    /// Runs for a single policy, in execution order.
    pub fn runs_for(&self, policy: PolicyKind) -> impl Iterator<Item = &RunResult> + '_ {
        self.runs.iter().filter(move |run| run.policy == policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serialize() {
        let mut report = BenchReport::new("nyc_taxi", 64, 16, 1024);
        report.runs.push(RunResult {
            policy: PolicyKind::Mru,
            filter: "True".to_string(),
            iterations: 10,
            mean_seconds: 0.25,
            rows: 100,
            cache_bytes: 2400,
            stats: CacheStats::new(),
        });

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["table"], "nyc_taxi");
        assert_eq!(json["capacity"], 64);
        assert_eq!(json["runs"][0]["policy"], "mru");
        assert_eq!(json["runs"][0]["cache_bytes"], 2400);
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_runs_for() {
        let mut report = BenchReport::new("t", 1, 1, 1);
        for policy in PolicyKind::ALL {
            report.runs.push(RunResult {
                policy,
                filter: "False".to_string(),
                iterations: 1,
                mean_seconds: 0.0,
                rows: 0,
                cache_bytes: 0,
                stats: CacheStats::new(),
            });
        }

        assert_eq!(report.runs_for(PolicyKind::NoOp).count(), 1);
    }
}
