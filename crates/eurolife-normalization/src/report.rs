use eurolife_map::DetectedRoles;
use serde::Serialize;
use tracing::{info, warn};

/// Row and cell accounting for one normalized dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizationReport {
    pub dataset: String,
    pub input_rows: usize,
    pub roles: DetectedRoles,
    /// Years pivoted out of column headers, empty for long tables.
    pub reshaped_years: Vec<i32>,
    pub dropped_missing_country: usize,
    pub dropped_outside_years: usize,
    /// Present cells that did not parse as a number.
    pub coerced_to_missing: usize,
    pub dropped_out_of_domain: usize,
    pub imputed_by_country: usize,
    pub imputed_by_dataset: usize,
    /// Number of rows sharing a `(country, year)` key with an earlier row.
    pub duplicate_keys: usize,
    pub output_rows: usize,
    pub extra_columns: Vec<String>,
}

impl NormalizationReport {
    pub fn new(dataset: impl Into<String>, input_rows: usize) -> Self {
        Self {
            dataset: dataset.into(),
            input_rows,
            ..Self::default()
        }
    }

    pub fn was_reshaped(&self) -> bool {
        !self.reshaped_years.is_empty()
    }

    pub fn imputed(&self) -> usize {
        self.imputed_by_country + self.imputed_by_dataset
    }

    pub fn log(&self) {
        info!(
            dataset = %self.dataset,
            input_rows = self.input_rows,
            reshaped = self.was_reshaped(),
            dropped_missing_country = self.dropped_missing_country,
            dropped_outside_years = self.dropped_outside_years,
            coerced_to_missing = self.coerced_to_missing,
            dropped_out_of_domain = self.dropped_out_of_domain,
            imputed_by_country = self.imputed_by_country,
            imputed_by_dataset = self.imputed_by_dataset,
            output_rows = self.output_rows,
            "normalization complete"
        );
        if self.duplicate_keys > 0 {
            warn!(
                dataset = %self.dataset,
                duplicates = self.duplicate_keys,
                "duplicate (country, year) keys kept as-is"
            );
        }
    }
}
