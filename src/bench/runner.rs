//! Scan Benchmark Runner
//!
//! Times repeated table scans through caches with different eviction
//! policies, emptying each cache between filters.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::bench::{BenchReport, RunResult};
use crate::cache::{Cache, PolicyKind};
use crate::config::BenchConfig;
use crate::error::Result;
use crate::scan::{RowFilter, SyntheticTable, Table};

/// Name of the generated table.
pub const BENCH_TABLE: &str = "iceberg_tutorial_db.nyc_taxi_iceberg";

/// Runs the benchmark described by `config` with caches of `capacity` entries.
///
/// # Errors
/// `InvalidConfig` for an unparsable filter or a zero capacity.
pub fn run_benchmark(config: &BenchConfig, capacity: usize) -> Result<BenchReport> {
    let filters = config
        .filters
        .iter()
        .map(|raw| raw.parse::<RowFilter>().map(|f| (raw.clone(), f)))
        .collect::<Result<Vec<_>>>()?;

    let table = SyntheticTable::generate(BENCH_TABLE, config.files, config.rows_per_file);
    let mut report = BenchReport::new(
        table.name(),
        capacity,
        config.files,
        config.rows_per_file,
    );

    for &policy in &config.policies {
        let mut cache: Cache<Arc<Table>, PolicyKind> = Cache::new(capacity, policy)?;

        for (raw, filter) in &filters {
            let run = run_filter(&table, filter, raw, config.iterations, &mut cache)?;

            info!(
                "cached retrieval for {} cache (filter: {}) took {:.6} seconds, cache size in bytes: {}",
                policy, raw, run.mean_seconds, run.cache_bytes
            );

            report.runs.push(run);
            cache.clear();
        }
    }

    Ok(report)
}

fn run_filter(
    table: &SyntheticTable,
    filter: &RowFilter,
    raw: &str,
    iterations: usize,
    cache: &mut Cache<Arc<Table>, PolicyKind>,
) -> Result<RunResult> {
    let mut total_seconds = 0.0;
    let mut rows = 0;

    for _ in 0..iterations {
        let start = Instant::now();
        let result = table.scan(filter.clone()).to_table(cache)?;
        total_seconds += start.elapsed().as_secs_f64();
        rows = result.num_rows();
    }

    Ok(RunResult {
        policy: *cache.policy(),
        filter: raw.to_string(),
        iterations,
        mean_seconds: total_seconds / iterations.max(1) as f64,
        rows,
        cache_bytes: cache.cache_byte_size(),
        stats: cache.stats(),
    })
}
