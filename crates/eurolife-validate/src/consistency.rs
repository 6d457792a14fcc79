use std::collections::BTreeSet;

use eurolife_model::{CanonicalDataset, ConsistencyThresholds};
use serde::Serialize;
use tracing::{info, warn};

/// Coverage of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetCoverage {
    pub name: String,
    pub value_name: String,
    pub records: usize,
    pub countries: BTreeSet<String>,
    pub years: BTreeSet<i32>,
    /// `(min, max)` of the value column, `None` when the dataset is empty.
    pub value_range: Option<(f64, f64)>,
}

impl DatasetCoverage {
    pub fn of(dataset: &CanonicalDataset) -> Self {
        Self {
            name: dataset.source_name.clone(),
            value_name: dataset.value_name.clone(),
            records: dataset.len(),
            countries: dataset.countries(),
            years: dataset.years(),
            value_range: dataset.value_range(),
        }
    }
}

/// Overlap of two datasets and whether it meets the thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyReport {
    pub left: DatasetCoverage,
    pub right: DatasetCoverage,
    pub common_countries: BTreeSet<String>,
    pub common_years: BTreeSet<i32>,
    pub countries_only_left: BTreeSet<String>,
    pub countries_only_right: BTreeSet<String>,
    pub years_only_left: BTreeSet<i32>,
    pub years_only_right: BTreeSet<i32>,
    pub thresholds: ConsistencyThresholds,
    pub passed: bool,
}

impl ConsistencyReport {
    pub fn countries_ok(&self) -> bool {
        self.common_countries.len() >= self.thresholds.min_common_countries
    }

    pub fn years_ok(&self) -> bool {
        self.common_years.len() >= self.thresholds.min_common_years
    }
}

/// Compares the country and year coverage of two datasets.
///
/// Passes iff they share at least `min_common_countries` countries and at
/// least `min_common_years` years.
pub fn validate_consistency(
    left: &CanonicalDataset,
    right: &CanonicalDataset,
    thresholds: &ConsistencyThresholds,
) -> ConsistencyReport {
    let left = DatasetCoverage::of(left);
    let right = DatasetCoverage::of(right);

    let common_countries: BTreeSet<String> =
        left.countries.intersection(&right.countries).cloned().collect();
    let common_years: BTreeSet<i32> = left.years.intersection(&right.years).copied().collect();
    let countries_only_left = left.countries.difference(&right.countries).cloned().collect();
    let countries_only_right = right.countries.difference(&left.countries).cloned().collect();
    let years_only_left = left.years.difference(&right.years).copied().collect();
    let years_only_right = right.years.difference(&left.years).copied().collect();

    let passed = common_countries.len() >= thresholds.min_common_countries
        && common_years.len() >= thresholds.min_common_years;

    let report = ConsistencyReport {
        left,
        right,
        common_countries,
        common_years,
        countries_only_left,
        countries_only_right,
        years_only_left,
        years_only_right,
        thresholds: *thresholds,
        passed,
    };

    info!(
        left = %report.left.name,
        right = %report.right.name,
        common_countries = report.common_countries.len(),
        common_years = report.common_years.len(),
        passed,
        "consistency check"
    );
    if !passed {
        warn!(
            min_common_countries = thresholds.min_common_countries,
            min_common_years = thresholds.min_common_years,
            "datasets do not overlap enough for joint analysis"
        );
    }
    report
}
