//! Single-dataset normalization.

use std::collections::BTreeSet;

use eurolife_common::{any_is_missing, any_to_f64, any_to_string_non_empty, column_cells, parse_year};
use eurolife_ingest::build_table_schema;
use eurolife_map::{ColumnRoleDetector, DetectedColumn, DetectedRoles, RolePatterns, find_year_columns};
use eurolife_model::{
    CanonicalDataset, CanonicalRecord, CountryCode, DatasetSpec, NormalizationOptions,
};
use polars::prelude::{AnyValue, DataFrame};
use tracing::{debug, info, info_span, warn};

use crate::country::CountryCodeNormalizer;
use crate::error::{NormalizationError, Result};
use crate::impute::impute_group_medians;
use crate::report::NormalizationReport;
use crate::wide::{YEAR_COLUMN, reshape_wide_to_long};

const COUNTRY_COLUMN: &str = "country";

/// A canonical dataset together with the accounting of how it was produced.
#[derive(Debug, Clone)]
pub struct NormalizedDataset {
    pub dataset: CanonicalDataset,
    pub report: NormalizationReport,
}

/// Source column names bound to the three canonical roles.
#[derive(Debug)]
struct RoleBinding {
    country: String,
    year: String,
    value: String,
}

#[derive(Debug)]
struct WorkingRow {
    country: String,
    year: i32,
    value: Option<f64>,
    extras: Vec<Option<String>>,
}

/// Turns one raw table into a [`CanonicalDataset`].
///
/// The steps run in a fixed order:
///
/// 1. detect column roles, reshaping a wide table when no time axis exists
/// 2. bind the detected columns to `country`, `year` and the value name
/// 3. fail with [`NormalizationError::MissingColumn`] if a role is unbound
/// 4. drop rows without a country
/// 5. collapse country aliases
/// 6. keep target years only
/// 7. coerce values to numbers, unparsable cells become missing
/// 8. drop present values outside the dataset's domain
/// 9. impute missing values by country median, then dataset median
/// 10. project to the canonical columns plus a few passthrough columns
///
/// The call is all-or-nothing: any error leaves no partial dataset behind.
#[derive(Debug, Clone, Copy)]
pub struct DatasetNormalizer<'a> {
    options: &'a NormalizationOptions,
}

impl<'a> DatasetNormalizer<'a> {
    pub fn new(options: &'a NormalizationOptions) -> Self {
        Self { options }
    }

    pub fn normalize(&self, table: &DataFrame, spec: &DatasetSpec) -> Result<NormalizedDataset> {
        let span = info_span!("normalize_dataset", dataset = %spec.name);
        let _guard = span.enter();

        let mut report = NormalizationReport::new(&spec.name, table.height());

        // Steps 1-3: roles, reshape, binding.
        let detector = ColumnRoleDetector::new(
            RolePatterns::with_value_candidates(&spec.value_candidates),
            self.options.year_range,
        );
        let roles = detector.detect(&build_table_schema(table));
        log_roles(&roles);
        report.roles = roles.clone();

        let reshaped;
        let (frame, binding) = if roles.needs_wide_check() {
            let names = column_names(table);
            let year_columns = find_year_columns(&names, &self.options.target_years);
            if year_columns.is_empty() {
                info!("no time column and no year-labeled columns found");
                (table, bind_roles(spec, table, &roles, None)?)
            } else {
                report.reshaped_years = year_columns.iter().map(|column| column.year).collect();
                info!(years = ?report.reshaped_years, "reshaping wide table to long form");
                reshaped = reshape_wide_to_long(table, &year_columns, &spec.value_name)?;
                let binding = bind_roles(
                    spec,
                    &reshaped,
                    &roles,
                    Some((YEAR_COLUMN, spec.value_name.as_str())),
                )?;
                (&reshaped, binding)
            }
        } else {
            (table, bind_roles(spec, table, &roles, None)?)
        };
        debug!(
            country = %binding.country,
            year = %binding.year,
            value = %binding.value,
            "bound canonical columns"
        );

        let extra_columns = select_extra_columns(frame, &binding, spec, self.options.max_extra_columns);
        let mut rows = self.collect_rows(frame, &binding, &extra_columns, spec, &mut report);

        // Step 9: imputation.
        let keys: Vec<String> = rows.iter().map(|row| row.country.clone()).collect();
        let mut values: Vec<Option<f64>> = rows.iter().map(|row| row.value).collect();
        let outcome = impute_group_medians(&keys, &mut values).ok_or_else(|| {
            NormalizationError::EmptyMedian {
                dataset: spec.name.clone(),
                column: spec.value_name.clone(),
            }
        })?;
        report.imputed_by_country = outcome.by_group;
        report.imputed_by_dataset = outcome.by_dataset;
        if outcome.by_dataset > 0 {
            warn!(
                count = outcome.by_dataset,
                "countries without any valid value were imputed with the dataset median"
            );
        }
        for (row, value) in rows.iter_mut().zip(values) {
            row.value = value;
        }

        // Step 10: projection.
        let mut dataset = CanonicalDataset::new(&spec.name, &spec.value_name);
        dataset.extra_columns = extra_columns.clone();
        let mut seen = BTreeSet::new();
        for row in rows {
            let Some(value) = row.value else {
                continue;
            };
            let Ok(country) = CountryCode::new(row.country) else {
                continue;
            };
            if !seen.insert((country.clone(), row.year)) {
                report.duplicate_keys += 1;
            }
            dataset.records.push(CanonicalRecord {
                country,
                year: row.year,
                value,
                extras: row.extras,
            });
        }

        report.output_rows = dataset.len();
        report.extra_columns = extra_columns;
        let countries = dataset.countries();
        info!(
            countries = countries.len(),
            columns = ?dataset.header(),
            "final shape: {} rows x {} columns",
            dataset.len(),
            dataset.header().len()
        );
        debug!(countries = ?countries, "distinct country codes");
        report.log();

        Ok(NormalizedDataset { dataset, report })
    }

    /// Steps 4-8.
    fn collect_rows(
        &self,
        frame: &DataFrame,
        binding: &RoleBinding,
        extra_columns: &[String],
        spec: &DatasetSpec,
        report: &mut NormalizationReport,
    ) -> Vec<WorkingRow> {
        let countries = column_cells(frame, &binding.country).unwrap_or_default();
        let years = column_cells(frame, &binding.year).unwrap_or_default();
        let values = column_cells(frame, &binding.value).unwrap_or_default();
        let extras: Vec<Vec<AnyValue<'_>>> = extra_columns
            .iter()
            .map(|name| column_cells(frame, name).unwrap_or_default())
            .collect();
        let normalizer = CountryCodeNormalizer::new(&self.options.aliases);

        let mut rows = Vec::with_capacity(frame.height());
        for idx in 0..frame.height() {
            let Some(country) = normalizer.normalize_cell(cell_at(&countries, idx)) else {
                report.dropped_missing_country += 1;
                continue;
            };

            let Some(year) = parse_year(cell_at(&years, idx)).filter(|year| self.options.target_years.contains(*year))
            else {
                report.dropped_outside_years += 1;
                continue;
            };

            let raw = cell_at(&values, idx);
            let value = if any_is_missing(&raw) {
                None
            } else {
                let parsed = any_to_f64(raw).filter(|v| v.is_finite());
                if parsed.is_none() {
                    report.coerced_to_missing += 1;
                }
                parsed
            };

            if value.is_some_and(|v| !spec.domain.contains(v)) {
                report.dropped_out_of_domain += 1;
                continue;
            }

            rows.push(WorkingRow {
                country,
                year,
                value,
                extras: extras
                    .iter()
                    .map(|cells| any_to_string_non_empty(cell_at(cells, idx)))
                    .collect(),
            });
        }

        if report.dropped_missing_country > 0 {
            info!(rows = report.dropped_missing_country, "removed rows with missing country");
        }
        info!(
            removed = report.dropped_outside_years,
            years = ?self.options.target_years.iter().collect::<Vec<_>>(),
            "filtered to target years"
        );
        if report.coerced_to_missing > 0 {
            info!(cells = report.coerced_to_missing, "non-numeric values coerced to missing");
        }
        if report.dropped_out_of_domain > 0 {
            info!(
                rows = report.dropped_out_of_domain,
                domain = %spec.domain,
                "removed out-of-domain values"
            );
        }
        rows
    }
}

fn cell_at<'a>(cells: &[AnyValue<'a>], idx: usize) -> AnyValue<'a> {
    cells.get(idx).cloned().unwrap_or(AnyValue::Null)
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn log_roles(roles: &DetectedRoles) {
    let describe = |column: &Option<DetectedColumn>| {
        column
            .as_ref()
            .map_or_else(|| "none".to_string(), |c| format!("{} ({:?})", c.name, c.method))
    };
    info!(
        country = %describe(&roles.country),
        time = %describe(&roles.time),
        value = %describe(&roles.value),
        "detected column roles"
    );
}

/// Binds each canonical role to a column of `frame`.
///
/// `reshaped` carries the year and value columns produced by reshaping, which
/// take precedence over detected ones.
fn bind_roles(
    spec: &DatasetSpec,
    frame: &DataFrame,
    roles: &DetectedRoles,
    reshaped: Option<(&str, &str)>,
) -> Result<RoleBinding> {
    let present = |name: &str| frame.column(name).is_ok();
    let detected = |column: &Option<DetectedColumn>| {
        column
            .as_ref()
            .map(|c| c.name.clone())
            .filter(|name| present(name.as_str()))
    };

    let country = detected(&roles.country);
    let (year, value) = match reshaped {
        Some((year, value)) => (Some(year.to_string()), Some(value.to_string())),
        None => (detected(&roles.time), detected(&roles.value)),
    };

    match (country, year, value) {
        (Some(country), Some(year), Some(value)) => Ok(RoleBinding {
            country,
            year,
            value,
        }),
        (country, year, value) => {
            let mut missing = Vec::new();
            if country.is_none() {
                missing.push(COUNTRY_COLUMN.to_string());
            }
            if year.is_none() {
                missing.push(YEAR_COLUMN.to_string());
            }
            if value.is_none() {
                missing.push(spec.value_name.clone());
            }
            warn!(missing = ?missing, "required columns not found");
            Err(NormalizationError::MissingColumn {
                dataset: spec.name.clone(),
                missing,
            })
        }
    }
}

/// Passthrough columns in source order, capped at `max`.
fn select_extra_columns(
    frame: &DataFrame,
    binding: &RoleBinding,
    spec: &DatasetSpec,
    max: usize,
) -> Vec<String> {
    let reserved = [
        binding.country.as_str(),
        binding.year.as_str(),
        binding.value.as_str(),
        COUNTRY_COLUMN,
        YEAR_COLUMN,
        spec.value_name.as_str(),
    ];
    column_names(frame)
        .into_iter()
        .filter(|name| !reserved.contains(&name.as_str()) && !is_index_artifact(name))
        .take(max)
        .collect()
}

/// Columns left behind by a spreadsheet or dataframe export index.
fn is_index_artifact(name: &str) -> bool {
    let trimmed = name.trim();
    let lower = trimmed.to_ascii_lowercase();
    trimmed.is_empty() || trimmed.starts_with("Unnamed") || lower == "unnamed" || lower == "index"
}

#[cfg(test)]
mod tests {
    use eurolife_model::ValueDomain;
    use polars::df;

    use super::*;

    fn normalize(df: &DataFrame, spec: &DatasetSpec) -> Result<NormalizedDataset> {
        let options = NormalizationOptions::default();
        DatasetNormalizer::new(&options).normalize(df, spec)
    }

    fn triples(dataset: &CanonicalDataset) -> Vec<(String, i32, f64)> {
        dataset
            .records
            .iter()
            .map(|r| (r.country.to_string(), r.year, r.value))
            .collect()
    }

    #[test]
    fn normalizes_wide_table() {
        let df = df! {
            "geo" => &["DE", "EL"],
            "2013" => &["7.2", "6.1"],
            "2018" => &["7.5", "6.3"],
        }
        .unwrap();

        let normalized = normalize(&df, &DatasetSpec::life_satisfaction()).unwrap();

        let mut rows = triples(&normalized.dataset);
        rows.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        assert_eq!(
            rows,
            vec![
                ("DE".to_string(), 2013, 7.2),
                ("DE".to_string(), 2018, 7.5),
                ("GR".to_string(), 2013, 6.1),
                ("GR".to_string(), 2018, 6.3),
            ]
        );
        assert_eq!(
            normalized.dataset.header(),
            vec!["country", "year", "life_satisfaction"]
        );
        assert_eq!(normalized.report.reshaped_years, vec![2013, 2018]);
    }

    #[test]
    fn normalizes_long_table_with_extras() {
        let df = df! {
            "Unnamed: 0" => &["0", "1", "2", "3"],
            "unit" => &["PC", "PC", "PC", "PC"],
            "geo" => &["DE", "DE", "FR", " UK "],
            "TIME_PERIOD" => &["2013", "2014", "2018", "2023"],
            "OBS_VALUE" => &["7.5", "7.0", "abc", "6.5"],
            "OBS_FLAG" => &[None, Some("b"), None, None],
        }
        .unwrap();

        let normalized = normalize(&df, &DatasetSpec::life_satisfaction()).unwrap();
        let dataset = &normalized.dataset;

        assert_eq!(dataset.extra_columns, vec!["unit", "OBS_FLAG"]);
        assert_eq!(
            triples(dataset),
            vec![
                ("DE".to_string(), 2013, 7.5),
                // FR had no valid value, so the dataset median fills it.
                ("FR".to_string(), 2018, 7.0),
                ("GB".to_string(), 2023, 6.5),
            ]
        );
        assert_eq!(dataset.records[0].extras, vec![Some("PC".to_string()), None]);

        let report = &normalized.report;
        assert_eq!(report.dropped_outside_years, 1);
        assert_eq!(report.coerced_to_missing, 1);
        assert_eq!(report.imputed_by_dataset, 1);
        assert!(!report.was_reshaped());
    }

    #[test]
    fn drops_missing_country_and_out_of_domain() {
        let df = df! {
            "geo" => &[Some("DE"), None, Some(" "), Some("FR"), Some("FR")],
            "time" => &["2013", "2013", "2013", "2013", "2018"],
            "values" => &["7.2", "7.0", "6.0", "11.5", "6.5"],
        }
        .unwrap();

        let normalized = normalize(&df, &DatasetSpec::life_satisfaction()).unwrap();

        assert_eq!(normalized.report.dropped_missing_country, 2);
        assert_eq!(normalized.report.dropped_out_of_domain, 1);
        assert_eq!(
            triples(&normalized.dataset),
            vec![("DE".to_string(), 2013, 7.2), ("FR".to_string(), 2018, 6.5)]
        );
    }

    #[test]
    fn imputes_from_own_country_first() {
        let df = df! {
            "geo" => &["DE", "DE", "DE", "FR"],
            "year" => &["2013", "2018", "2021", "2013"],
            "income" => &["100", "300", ":", "900"],
        }
        .unwrap();

        let normalized = normalize(&df, &DatasetSpec::income()).unwrap();

        assert_eq!(normalized.dataset.records[2].value, 200.0);
        assert_eq!(normalized.report.imputed_by_country, 1);
        assert_eq!(normalized.report.imputed_by_dataset, 0);
    }

    #[test]
    fn missing_value_column_is_terminal() {
        let df = df! {
            "geo" => &["DE"],
            "time" => &["2013"],
            "comment" => &["n/a"],
        }
        .unwrap();

        let err = normalize(&df, &DatasetSpec::life_satisfaction()).unwrap_err();
        match err {
            NormalizationError::MissingColumn { missing, .. } => {
                assert_eq!(missing, vec!["life_satisfaction"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wide_table_without_target_years_is_missing_year() {
        let df = df! {
            "geo" => &["DE"],
            "1999" => &["7.0"],
        }
        .unwrap();

        let err = normalize(&df, &DatasetSpec::life_satisfaction()).unwrap_err();
        assert!(matches!(
            err,
            NormalizationError::MissingColumn { ref missing, .. } if missing.contains(&"year".to_string())
        ));
    }

    #[test]
    fn no_valid_values_is_empty_median() {
        let df = df! {
            "geo" => &["DE", "FR"],
            "time" => &["2013", "2013"],
            "values" => &[":", "-5"],
        }
        .unwrap();

        let err = normalize(&df, &DatasetSpec::income()).unwrap_err();
        assert!(matches!(err, NormalizationError::EmptyMedian { .. }));
    }

    #[test]
    fn counts_duplicate_keys_without_removing_them() {
        let df = df! {
            "geo" => &["EL", "GR"],
            "time" => &["2013", "2013"],
            "values" => &["6.0", "6.2"],
        }
        .unwrap();

        let normalized = normalize(&df, &DatasetSpec::life_satisfaction()).unwrap();

        assert_eq!(normalized.dataset.len(), 2);
        assert_eq!(normalized.report.duplicate_keys, 1);
    }

    #[test]
    fn respects_custom_domain_and_extra_cap() {
        let mut spec = DatasetSpec::life_satisfaction();
        spec.domain = ValueDomain::Closed { min: 5.0, max: 6.0 };
        let options = NormalizationOptions::default().with_max_extra_columns(1);
        let df = df! {
            "a" => &["x", "y"],
            "b" => &["x", "y"],
            "geo" => &["DE", "FR"],
            "time" => &["2013", "2013"],
            "values" => &["5.5", "7.0"],
        }
        .unwrap();

        let normalized = DatasetNormalizer::new(&options).normalize(&df, &spec).unwrap();

        assert_eq!(normalized.dataset.extra_columns, vec!["a"]);
        assert_eq!(normalized.dataset.len(), 1);
    }

    #[test]
    fn index_artifacts() {
        assert!(is_index_artifact("Unnamed: 0"));
        assert!(is_index_artifact("index"));
        assert!(is_index_artifact("INDEX"));
        assert!(is_index_artifact(""));
        assert!(!is_index_artifact("unit"));
    }
}
