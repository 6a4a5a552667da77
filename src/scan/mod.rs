//! Scan Module
//!
//! Table-scan harness that materializes data files through a [`Cache`](crate::cache::Cache).

mod filter;
mod plan;
mod table;

pub use filter::RowFilter;
pub use plan::{
    DataFile, SyntheticTable, TableScan, FARE_CENTS, FILE_COLUMNS, PASSENGER_COUNT, TRIP_ID,
};
pub use table::{Column, Table};
