//! Preprocessing pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: Read each tabular input into a frame
//! 2. **Normalize**: Turn each frame into a canonical dataset
//! 3. **Geometry**: Read the boundary document and add canonical keys
//! 4. **Validate**: Compare country and year coverage across datasets
//! 5. **Output**: Write cleaned datasets and the boundary document
//!
//! A failure in one dataset never stops the others; it is recorded in the
//! run result and the remaining stages continue.

use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{error, info, info_span, warn};

use eurolife_ingest::{IngestError, profile_table, read_csv_table, read_feature_collection};
use eurolife_model::{
    CanonicalDataset, ConsistencyThresholds, DatasetSpec, FeatureCollection, GeometrySpec,
    NormalizationOptions, PipelineConfig,
};
use eurolife_normalization::{
    DatasetNormalizer, GeometryNormalizer, GeometryReport, NormalizationError, NormalizedDataset,
};
use eurolife_output::{OutputError, write_dataset_csv, write_feature_collection};
use eurolife_validate::{ConsistencyReport, validate_consistency};

use crate::types::{DatasetSummary, GeometrySummary, RunResult, StageStatus};

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Reads the raw table of one dataset.
pub fn ingest_dataset(input_dir: &Path, spec: &DatasetSpec) -> Result<DataFrame, IngestError> {
    let span = info_span!("ingest", dataset = %spec.name);
    let _guard = span.enter();
    let start = Instant::now();

    let path = input_dir.join(&spec.file_name);
    info!(path = %path.display(), "loading dataset");
    let table = read_csv_table(&path)?;
    profile_table(&table, &spec.name);

    info!(
        rows = table.height(),
        elapsed_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(table)
}

// ============================================================================
// Stage 2: Normalize
// ============================================================================

pub fn normalize_dataset(
    table: &DataFrame,
    spec: &DatasetSpec,
    options: &NormalizationOptions,
) -> Result<NormalizedDataset, NormalizationError> {
    let span = info_span!("normalize", dataset = %spec.name);
    let _guard = span.enter();
    let start = Instant::now();

    let normalized = DatasetNormalizer::new(options).normalize(table, spec)?;

    info!(
        records = normalized.dataset.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "normalize complete"
    );
    Ok(normalized)
}

// ============================================================================
// Stage 3: Geometry
// ============================================================================

/// Reads the boundary document and adds the canonical property keys.
pub fn load_geometry(
    input_dir: &Path,
    spec: &GeometrySpec,
) -> Result<(FeatureCollection, GeometryReport), IngestError> {
    let span = info_span!("geometry", file = %spec.file_name);
    let _guard = span.enter();

    let mut collection = read_feature_collection(&input_dir.join(&spec.file_name))?;
    let report = GeometryNormalizer::new(spec).normalize(&mut collection);
    Ok((collection, report))
}

// ============================================================================
// Stage 4: Validate
// ============================================================================

/// Checks the first dataset against each of the others.
///
/// Returns no reports when fewer than two datasets are available.
pub fn validate(
    datasets: &[&CanonicalDataset],
    thresholds: &ConsistencyThresholds,
) -> Vec<ConsistencyReport> {
    let span = info_span!("validate", datasets = datasets.len());
    let _guard = span.enter();

    let Some((first, rest)) = datasets.split_first() else {
        warn!("cannot validate: no dataset was normalized");
        return Vec::new();
    };
    if rest.is_empty() {
        warn!(dataset = %first.source_name, "cannot validate: only one dataset was normalized");
        return Vec::new();
    }
    rest.iter()
        .map(|other| validate_consistency(first, other, thresholds))
        .collect()
}

// ============================================================================
// Stage 5: Output
// ============================================================================

pub fn output_dataset(
    output_dir: &Path,
    spec: &DatasetSpec,
    dataset: &CanonicalDataset,
) -> Result<PathBuf, OutputError> {
    let span = info_span!("output", dataset = %spec.name);
    let _guard = span.enter();

    let path = output_dir.join(&spec.file_name);
    write_dataset_csv(&path, dataset)?;
    Ok(path)
}

pub fn output_geometry(
    output_dir: &Path,
    spec: &GeometrySpec,
    collection: &FeatureCollection,
) -> Result<PathBuf, OutputError> {
    let span = info_span!("output", file = %spec.file_name);
    let _guard = span.enter();

    let path = output_dir.join(&spec.file_name);
    write_feature_collection(&path, collection)?;
    Ok(path)
}

// ============================================================================
// Run
// ============================================================================

/// Runs every stage once.
pub fn run_pipeline(config: &PipelineConfig) -> RunResult {
    let start = Instant::now();
    let mut result = RunResult {
        input_dir: config.input_dir.clone(),
        output_dir: config.output_dir.clone(),
        ..RunResult::default()
    };

    let mut prepared = Vec::with_capacity(config.datasets.len());
    for spec in &config.datasets {
        let outcome = prepare_dataset(config, spec).map_err(|(status, message)| {
            result.errors.push(message);
            status
        });
        prepared.push((spec, outcome));
    }

    let geometry = match load_geometry(&config.input_dir, &config.geometry) {
        Ok(loaded) => Some(loaded),
        Err(err) => {
            error!(error = %err, "could not load boundary document");
            result
                .errors
                .push(format!("{}: {err}", config.geometry.file_name));
            None
        }
    };

    let canonical: Vec<&CanonicalDataset> = prepared
        .iter()
        .filter_map(|(_, outcome)| outcome.as_ref().ok())
        .map(|normalized| &normalized.dataset)
        .collect();
    result.consistency = validate(&canonical, &config.consistency);

    for (spec, outcome) in prepared {
        let summary = match outcome {
            Ok(normalized) => {
                let output = match output_dataset(&config.output_dir, spec, &normalized.dataset) {
                    Ok(path) => Some(path),
                    Err(err) => {
                        error!(dataset = %spec.name, error = %err, "could not save dataset");
                        result.errors.push(format!("{}: {err}", spec.name));
                        None
                    }
                };
                DatasetSummary {
                    name: spec.name.clone(),
                    value_name: spec.value_name.clone(),
                    records: normalized.dataset.len(),
                    countries: normalized.dataset.countries().len(),
                    years: normalized.dataset.years().into_iter().collect(),
                    status: if output.is_some() {
                        StageStatus::Written
                    } else {
                        StageStatus::WriteFailed
                    },
                    output,
                    report: Some(normalized.report),
                }
            }
            Err(status) => DatasetSummary {
                name: spec.name.clone(),
                value_name: spec.value_name.clone(),
                records: 0,
                countries: 0,
                years: Vec::new(),
                report: None,
                output: None,
                status,
            },
        };
        result.datasets.push(summary);
    }

    if let Some((collection, report)) = geometry {
        let output = match output_geometry(&config.output_dir, &config.geometry, &collection) {
            Ok(path) => Some(path),
            Err(err) => {
                error!(error = %err, "could not save boundary document");
                result
                    .errors
                    .push(format!("{}: {err}", config.geometry.file_name));
                None
            }
        };
        result.geometry = Some(GeometrySummary {
            features: collection.len(),
            report,
            output,
        });
    }

    info!(
        errors = result.errors.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "pipeline finished"
    );
    result
}

fn prepare_dataset(
    config: &PipelineConfig,
    spec: &DatasetSpec,
) -> Result<NormalizedDataset, (StageStatus, String)> {
    let table = ingest_dataset(&config.input_dir, spec).map_err(|err| {
        error!(dataset = %spec.name, error = %err, "could not load dataset");
        let status = if err.is_missing_file() {
            StageStatus::MissingFile
        } else {
            StageStatus::IngestFailed
        };
        (status, format!("{}: {err}", spec.name))
    })?;

    normalize_dataset(&table, spec, &config.normalization).map_err(|err| {
        error!(dataset = %spec.name, error = %err, "could not normalize dataset");
        (StageStatus::NormalizationFailed, err.to_string())
    })
}
