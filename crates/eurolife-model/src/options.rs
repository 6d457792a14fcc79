//! Configuration for a pipeline run.
//!
//! Directories, target years, aliases and dataset descriptions are built
//! once into a [`PipelineConfig`] and passed explicitly into each stage.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::country::CountryAliases;
use crate::dataset::ValueDomain;
use crate::years::{TargetYears, YearRange};

/// Options consulted by detection, reshaping and normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationOptions {
    pub target_years: TargetYears,
    pub aliases: CountryAliases,
    /// Bounds for recognising an unnamed all-numeric time column.
    pub year_range: YearRange,
    /// Maximum number of passthrough columns kept after `country, year, value`.
    pub max_extra_columns: usize,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            target_years: TargetYears::default(),
            aliases: CountryAliases::default(),
            year_range: YearRange::default(),
            max_extra_columns: 3,
        }
    }
}

impl NormalizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_target_years(mut self, years: TargetYears) -> Self {
        self.target_years = years;
        self
    }

    #[must_use]
    pub fn with_aliases(mut self, aliases: CountryAliases) -> Self {
        self.aliases = aliases;
        self
    }

    #[must_use]
    pub fn with_max_extra_columns(mut self, max: usize) -> Self {
        self.max_extra_columns = max;
        self
    }
}

/// Minimum overlap two datasets need to be jointly useful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyThresholds {
    pub min_common_countries: usize,
    pub min_common_years: usize,
}

impl Default for ConsistencyThresholds {
    fn default() -> Self {
        Self {
            min_common_countries: 20,
            min_common_years: 3,
        }
    }
}

/// One tabular input and how to normalize it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// Display name used in logs and the summary.
    pub name: String,
    /// File name, relative to both the input and output directories.
    pub file_name: String,
    /// Canonical name of the value column in the output.
    pub value_name: String,
    /// Case-insensitive substrings that identify the value column.
    pub value_candidates: Vec<String>,
    pub domain: ValueDomain,
}

impl DatasetSpec {
    pub fn life_satisfaction() -> Self {
        Self {
            name: "Life Satisfaction".to_string(),
            file_name: "eurostat_life_satisfaction.csv".to_string(),
            value_name: "life_satisfaction".to_string(),
            value_candidates: to_strings(&[
                "values",
                "value",
                "obs_value",
                "life_satisfaction",
                "satisfaction",
            ]),
            domain: ValueDomain::Closed {
                min: 0.0,
                max: 10.0,
            },
        }
    }

    pub fn income() -> Self {
        Self {
            name: "Income".to_string(),
            file_name: "eurostat_income.csv".to_string(),
            value_name: "median_income".to_string(),
            value_candidates: to_strings(&[
                "values",
                "value",
                "obs_value",
                "income",
                "median",
                "disposable",
            ]),
            domain: ValueDomain::Positive,
        }
    }
}

/// The geographic boundary input and the property keys it may use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometrySpec {
    pub file_name: String,
    /// Source keys for `country_code`, highest priority first.
    pub code_keys: Vec<String>,
    /// Source keys for `country_name`, highest priority first.
    pub name_keys: Vec<String>,
}

impl Default for GeometrySpec {
    fn default() -> Self {
        Self {
            file_name: "european_countries.json".to_string(),
            code_keys: to_strings(&["CNTR_CODE", "iso_a2"]),
            name_keys: to_strings(&["NAME_LATN", "name"]),
        }
    }
}

/// Complete configuration of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub normalization: NormalizationOptions,
    pub consistency: ConsistencyThresholds,
    pub datasets: Vec<DatasetSpec>,
    pub geometry: GeometrySpec,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("Datasets - Task 2/raw"),
            output_dir: PathBuf::from("Datasets - Task 2/cleaned"),
            normalization: NormalizationOptions::default(),
            consistency: ConsistencyThresholds::default(),
            datasets: vec![DatasetSpec::life_satisfaction(), DatasetSpec::income()],
            geometry: GeometrySpec::default(),
        }
    }
}

impl PipelineConfig {
    #[must_use]
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
