//! Canonical dataset -> CSV.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use eurolife_model::CanonicalDataset;
use polars::prelude::*;
use tracing::info;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Builds a frame with columns `country, year, <value_name>, extras...`.
pub fn dataset_to_frame(dataset: &CanonicalDataset) -> PolarsResult<DataFrame> {
    let records = &dataset.records;
    let countries: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
    let years: Vec<i32> = records.iter().map(|r| r.year).collect();
    let values: Vec<f64> = records.iter().map(|r| r.value).collect();

    let mut columns = vec![
        Series::new("country".into(), countries).into_column(),
        Series::new("year".into(), years).into_column(),
        Series::new(dataset.value_name.as_str().into(), values).into_column(),
    ];
    for (idx, name) in dataset.extra_columns.iter().enumerate() {
        let cells: Vec<Option<&str>> = records
            .iter()
            .map(|r| r.extras.get(idx).and_then(|cell| cell.as_deref()))
            .collect();
        columns.push(Series::new(name.as_str().into(), cells).into_column());
    }
    DataFrame::new(columns)
}

/// Writes `dataset` as a headed CSV file at `path`.
pub fn write_dataset_csv(path: &Path, dataset: &CanonicalDataset) -> Result<()> {
    let csv_error = |source| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut frame = dataset_to_frame(dataset).map_err(csv_error)?;

    ensure_parent_dir(path)?;
    let write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    CsvWriter::new(&mut writer)
        .include_header(true)
        .finish(&mut frame)
        .map_err(csv_error)?;
    writer.flush().map_err(write_error)?;

    info!(
        dataset = %dataset.source_name,
        path = %path.display(),
        rows = frame.height(),
        "wrote cleaned dataset"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use eurolife_model::{CanonicalRecord, CountryCode};

    use super::*;

    #[test]
    fn frame_has_canonical_columns() {
        let mut dataset = CanonicalDataset::new("Income", "median_income");
        dataset.extra_columns = vec!["unit".to_string()];
        dataset.records.push(CanonicalRecord {
            country: CountryCode::new("DE").unwrap(),
            year: 2018,
            value: 23000.0,
            extras: vec![None],
        });

        let frame = dataset_to_frame(&dataset).unwrap();

        assert_eq!(frame.height(), 1);
        assert_eq!(
            frame
                .get_column_names()
                .iter()
                .map(|name| name.as_str())
                .collect::<Vec<_>>(),
            vec!["country", "year", "median_income", "unit"]
        );
        assert_eq!(frame.column("unit").unwrap().null_count(), 1);
    }
}
