//! Scan benchmark: compares eviction policies on repeated table scans.

mod report;
mod runner;

pub use report::{BenchReport, RunResult};
pub use runner::{run_benchmark, BENCH_TABLE};
