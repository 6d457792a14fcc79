//! Delimited table reading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use eurolife_common::any_is_missing;
use polars::prelude::{AnyValue, CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Shape and completeness of a freshly loaded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableProfile {
    pub rows: usize,
    pub columns: Vec<String>,
    pub missing_cells: usize,
}

/// Reads the first line of a file, without a BOM.
fn read_header_line(path: &Path) -> Result<Option<String>> {
    let file = File::open(path).map_err(|e| IngestError::open(path, e))?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    if read == 0 {
        return Ok(None);
    }
    let cleaned = line.strip_prefix('\u{feff}').unwrap_or(&line).trim_end();
    Ok(Some(cleaned.to_string()))
}

/// Reads a CSV file into a DataFrame of string columns.
///
/// Every column is read as text. Statistical exports mix numbers with flags
/// and placeholders (`:`, `7.2 b`), so typing is left to the normalizer,
/// which coerces cell by cell. Header names are trimmed.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    let header = read_header_line(path)?;
    if header.as_deref().is_none_or(|line| line.trim().is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim().trim_matches('\u{feff}').to_string())
        .collect();
    let changed = names
        .iter()
        .zip(df.get_column_names())
        .any(|(trimmed, original)| trimmed.as_str() != original.as_str());
    if changed {
        df.set_column_names(names.iter().map(String::as_str))?;
    }

    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "csv loaded");
    Ok(df)
}

/// Profiles a table and logs its shape, columns and missing-cell count.
pub fn profile_table(df: &DataFrame, dataset: &str) -> TableProfile {
    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let mut missing_cells = 0usize;
    for column in df.get_columns() {
        for idx in 0..column.len() {
            if any_is_missing(&column.get(idx).unwrap_or(AnyValue::Null)) {
                missing_cells += 1;
            }
        }
    }
    info!(
        dataset,
        rows = df.height(),
        columns = columns.len(),
        missing_cells,
        "loaded {dataset}: columns {columns:?}"
    );
    TableProfile {
        rows: df.height(),
        columns,
        missing_cells,
    }
}
