//! Table Module
//!
//! Columnar in-memory tables, the artifacts a scan materializes and caches.

use serde::Serialize;

use crate::cache::BufferSize;
use crate::error::{CacheError, Result};
use crate::scan::RowFilter;

// == Column ==
/// A named column of 64-bit integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<i64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

// == Table ==
/// A set of equally long columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    // == Constructor ==
    /// Builds a table from columns.
    ///
    /// Returns `None` if the columns differ in length.
    pub fn new(columns: Vec<Column>) -> Option<Self> {
        let rows = columns.first().map(|c| c.values.len()).unwrap_or(0);
        if columns.iter().any(|c| c.values.len() != rows) {
            return None;
        }
        Some(Self { columns })
    }

    /// An empty table with the given column names.
    pub fn empty(names: &[&str]) -> Self {
        Self {
            columns: names.iter().map(|n| Column::new(*n, Vec::new())).collect(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    // == Filter ==
    /// Returns a new table holding only the rows `filter` accepts.
    pub fn filter(&self, filter: &RowFilter) -> Table {
        let keep: Vec<usize> = (0..self.num_rows())
            .filter(|&row| filter.matches_row(self, row))
            .collect();

        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), keep.iter().map(|&r| c.values[r]).collect()))
                .collect(),
        }
    }

    // == Concat ==
    /// Appends the rows of `other`.
    ///
    /// Both tables must have the same column names in the same order. An
    /// empty `self` with no columns adopts `other`'s layout, and a table with
    /// no columns appends nothing.
    ///
    /// # Errors
    /// `SchemaMismatch` if the layouts differ; `self` is left unchanged.
    pub fn append(&mut self, other: &Table) -> Result<()> {
        if self.columns.is_empty() {
            self.columns = other.columns.clone();
            return Ok(());
        }
        if other.columns.is_empty() {
            return Ok(());
        }

        if self.columns.len() != other.columns.len() {
            return Err(CacheError::SchemaMismatch(format!(
                "expected {} columns, found {}",
                self.columns.len(),
                other.columns.len()
            )));
        }
        if let Some((mine, theirs)) = self
            .columns
            .iter()
            .zip(&other.columns)
            .find(|(mine, theirs)| mine.name != theirs.name)
        {
            return Err(CacheError::SchemaMismatch(format!(
                "expected column '{}', found '{}'",
                mine.name, theirs.name
            )));
        }

        for (mine, theirs) in self.columns.iter_mut().zip(&other.columns) {
            mine.values.extend_from_slice(&theirs.values);
        }
        Ok(())
    }

    /// Concatenates tables in order into a table with the given columns.
    ///
    /// With no tables the result is empty but keeps `schema`.
    pub fn concat<'a>(
        schema: &[&str],
        tables: impl IntoIterator<Item = &'a Table>,
    ) -> Result<Table> {
        let mut out = Table::empty(schema);
        for table in tables {
            out.append(table)?;
        }
        Ok(out)
    }
}

impl BufferSize for Table {
    fn total_buffer_size(&self) -> u64 {
        self.columns
            .iter()
            .map(|c| (c.values.len() * std::mem::size_of::<i64>()) as u64)
            .sum()
    }
}
