//! Data ingestion for the eurolife pipeline.
//!
//! Reads the raw inputs into in-memory structures and describes them for
//! column role detection.
//!
//! # Features
//!
//! - **CSV Loading**: delimited tables into Polars DataFrames
//! - **Feature Collections**: boundary documents into the typed model
//! - **Schema Description**: per-column numeric summaries for detection
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use eurolife_ingest::{read_csv_table, build_table_schema};
//!
//! let df = read_csv_table(Path::new("raw/eurostat_income.csv"))?;
//! let schema = build_table_schema(&df);
//! ```

mod csv;
mod error;
mod geo;
mod schema;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{TableProfile, profile_table, read_csv_table};

// === Feature Collections ===
pub use geo::read_feature_collection;

// === Schema Description ===
pub use schema::{build_table_schema, summarize_column};
