//! Shared utilities for eurolife crates.
//!
//! This crate provides the cell-level conversions every stage needs when
//! reading loosely typed statistical tables through Polars.

pub mod polars;

pub use polars::{
    any_is_missing, any_to_f64, any_to_string, any_to_string_non_empty, column_cells,
    format_numeric, parse_f64, parse_i64, parse_year,
};
