//! Scan Planning Module
//!
//! Synthetic data files and a table scan that consults a [`Cache`] before
//! materializing each file.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::cache::{Cache, EvictionPolicy};
use crate::error::{CacheError, Result};
use crate::scan::{Column, RowFilter, Table};

/// Column whose value drives file pruning in the benchmark filters.
pub const PASSENGER_COUNT: &str = "passenger_count";
pub const TRIP_ID: &str = "trip_id";
pub const FARE_CENTS: &str = "fare_cents";

/// Columns of every data file, in order.
pub const FILE_COLUMNS: [&str; 3] = [TRIP_ID, PASSENGER_COUNT, FARE_CENTS];

// == Data File ==
/// A deterministic synthetic data file.
///
/// Rows are generated on [`DataFile::load`], standing in for a remote read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    path: String,
    first_row_id: i64,
    passenger_base: i64,
    rows: usize,
}

impl DataFile {
    pub fn new(path: impl Into<String>, first_row_id: i64, passenger_base: i64, rows: usize) -> Self {
        Self {
            path: path.into(),
            first_row_id,
            passenger_base,
            rows,
        }
    }

    /// Path of the file; also its cache key.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Inclusive `(min, max)` bounds for a column, if statistics exist.
    pub fn bounds(&self, column: &str) -> Option<(i64, i64)> {
        if self.rows == 0 {
            return None;
        }
        let last = (self.rows - 1) as i64;
        match column {
            TRIP_ID => Some((self.first_row_id, self.first_row_id + last)),
            PASSENGER_COUNT => Some((self.passenger_base, self.passenger_base + last.min(1))),
            _ => None,
        }
    }

    // == Load ==
    /// Materializes every row of the file.
    ///
    /// # Errors
    /// `SchemaMismatch` if the generated columns differ in length.
    pub fn load(&self) -> Result<Table> {
        let ids: Vec<i64> = (0..self.rows as i64).map(|r| self.first_row_id + r).collect();
        let passengers = (0..self.rows as i64)
            .map(|r| self.passenger_base + r % 2)
            .collect();
        let fares = ids.iter().map(|id| 250 + (id * 37) % 5000).collect();

        Table::new(vec![
            Column::new(TRIP_ID, ids),
            Column::new(PASSENGER_COUNT, passengers),
            Column::new(FARE_CENTS, fares),
        ])
        .ok_or_else(|| {
            CacheError::SchemaMismatch(format!("data file {} has ragged columns", self.path))
        })
    }
}

// == Synthetic Table ==
/// A named table made of data files.
#[derive(Debug, Clone)]
pub struct SyntheticTable {
    name: String,
    files: Vec<DataFile>,
}

impl SyntheticTable {
    /// Generates `files` data files of `rows_per_file` rows each.
    ///
    /// File `i` carries passenger counts in `[i % 8, i % 8 + 1]`.
    pub fn generate(name: impl Into<String>, files: usize, rows_per_file: usize) -> Self {
        let name = name.into();
        let files = (0..files)
            .map(|i| {
                DataFile::new(
                    format!("{}/data/{:05}.parquet", name, i),
                    (i * rows_per_file) as i64,
                    (i % 8) as i64,
                    rows_per_file,
                )
            })
            .collect();

        Self { name, files }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn files(&self) -> &[DataFile] {
        &self.files
    }

    /// Starts a scan with the given row filter.
    pub fn scan(&self, filter: RowFilter) -> TableScan<'_> {
        TableScan {
            table: self,
            filter,
        }
    }
}

// == Table Scan ==
/// A planned read of a [`SyntheticTable`].
#[derive(Debug, Clone)]
pub struct TableScan<'a> {
    table: &'a SyntheticTable,
    filter: RowFilter,
}

impl<'a> TableScan<'a> {
    pub fn filter(&self) -> &RowFilter {
        &self.filter
    }

    /// Files that may hold matching rows.
    pub fn plan_files(&self) -> Vec<&'a DataFile> {
        self.table
            .files
            .iter()
            .filter(|file| self.filter.might_match(file))
            .collect()
    }

    // == To Table ==
    /// Reads every planned file and returns the filtered rows.
    ///
    /// The result always carries [`FILE_COLUMNS`], even when every file is
    /// pruned.
    ///
    /// Each file is looked up in `cache` by path first; misses are loaded and
    /// inserted so the next scan can reuse them.
    pub fn to_table<P: EvictionPolicy>(&self, cache: &mut Cache<Arc<Table>, P>) -> Result<Table> {
        let files = self.plan_files();
        debug!(
            table = self.table.name(),
            filter = %self.filter,
            files = files.len(),
            "planned scan"
        );

        let mut parts = Vec::with_capacity(files.len());
        for file in files {
            let loaded = match cache.get(file.path()).cloned() {
                Some(table) => table,
                None => {
                    trace!(path = file.path(), "loading data file");
                    let table = Arc::new(file.load()?);
                    cache.put(file.path(), Arc::clone(&table))?;
                    table
                }
            };
            parts.push(loaded.filter(&self.filter));
        }

        Table::concat(&FILE_COLUMNS, &parts)
    }
}
