//! Row filters and their file-level pruning rules.

use std::fmt;
use std::str::FromStr;

use crate::error::CacheError;
use crate::scan::{DataFile, Table};

// == Row Filter ==
/// Predicate applied during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
    AlwaysTrue,
    AlwaysFalse,
    /// `column == value`
    Eq { column: String, value: i64 },
}

impl RowFilter {
    /// Whether `file` may hold matching rows, judged from its column bounds.
    pub fn might_match(&self, file: &DataFile) -> bool {
        match self {
            RowFilter::AlwaysTrue => true,
            RowFilter::AlwaysFalse => false,
            RowFilter::Eq { column, value } => match file.bounds(column) {
                Some((lo, hi)) => lo <= *value && *value <= hi,
                // No statistics for the column, so it cannot be pruned
                None => true,
            },
        }
    }

    /// Whether row `row` of `table` satisfies the filter.
    pub fn matches_row(&self, table: &Table, row: usize) -> bool {
        match self {
            RowFilter::AlwaysTrue => true,
            RowFilter::AlwaysFalse => false,
            RowFilter::Eq { column, value } => table
                .column(column)
                .and_then(|c| c.values.get(row))
                .is_some_and(|v| v == value),
        }
    }
}

impl fmt::Display for RowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFilter::AlwaysTrue => f.write_str("True"),
            RowFilter::AlwaysFalse => f.write_str("False"),
            RowFilter::Eq { column, value } => write!(f, "{} == {}", column, value),
        }
    }
}

impl FromStr for RowFilter {
    type Err = CacheError;

    /// Parses `True`, `False` or `<column> == <integer>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("true") {
            return Ok(RowFilter::AlwaysTrue);
        }
        if s.eq_ignore_ascii_case("false") {
            return Ok(RowFilter::AlwaysFalse);
        }

        let invalid = || CacheError::InvalidConfig(format!("unsupported row filter '{}'", s));
        let (column, value) = s.split_once("==").ok_or_else(invalid)?;
        let column = column.trim();
        if column.is_empty() || column.contains(char::is_whitespace) {
            return Err(invalid());
        }
        let value = value.trim().parse().map_err(|_| invalid())?;

        Ok(RowFilter::Eq {
            column: column.to_string(),
            value,
        })
    }
}
