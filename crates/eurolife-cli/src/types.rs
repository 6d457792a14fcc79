use std::path::PathBuf;

use eurolife_normalization::{GeometryReport, NormalizationReport};
use eurolife_validate::ConsistencyReport;

/// Outcome of one pipeline run.
#[derive(Debug, Default)]
pub struct RunResult {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub datasets: Vec<DatasetSummary>,
    pub geometry: Option<GeometrySummary>,
    pub consistency: Vec<ConsistencyReport>,
    /// One line per dataset or file that could not be processed.
    pub errors: Vec<String>,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn consistency_passed(&self) -> bool {
        !self.consistency.is_empty() && self.consistency.iter().all(|report| report.passed)
    }
}

#[derive(Debug)]
pub struct DatasetSummary {
    pub name: String,
    pub value_name: String,
    pub records: usize,
    pub countries: usize,
    pub years: Vec<i32>,
    pub report: Option<NormalizationReport>,
    pub output: Option<PathBuf>,
    pub status: StageStatus,
}

#[derive(Debug)]
pub struct GeometrySummary {
    pub features: usize,
    pub report: GeometryReport,
    pub output: Option<PathBuf>,
}

/// Furthest stage a dataset reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    MissingFile,
    IngestFailed,
    NormalizationFailed,
    WriteFailed,
    Written,
}

impl StageStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingFile => "missing file",
            Self::IngestFailed => "unreadable",
            Self::NormalizationFailed => "not normalized",
            Self::WriteFailed => "write failed",
            Self::Written => "written",
        }
    }
}
