//! Scan Cache benchmark
//!
//! Scans a synthetic table repeatedly through LRU, MRU and disabled caches
//! and prints the timings as JSON.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scan_cache::bench::run_benchmark;
use scan_cache::Config;

/// Main entry point for the scan benchmark.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Run every configured policy against every filter
/// 4. Print the report to stdout
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scan_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: capacity={}, iterations={}, files={}, rows_per_file={}",
        config.cache.capacity,
        config.bench.iterations,
        config.bench.files,
        config.bench.rows_per_file
    );

    let report = run_benchmark(&config.bench, config.cache.capacity)
        .context("benchmark run failed")?;

    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    println!("{}", json);

    info!("Benchmark complete: {} runs", report.runs.len());
    Ok(())
}
