use polars::prelude::PolarsError;
use thiserror::Error;

/// Terminal failures for one dataset.
#[derive(Debug, Error)]
pub enum NormalizationError {
    /// A canonical column could not be detected or produced by reshaping.
    #[error("{dataset}: missing required columns: {}", .missing.join(", "))]
    MissingColumn {
        dataset: String,
        missing: Vec<String>,
    },

    /// No valid value remains from which to compute a median.
    #[error("{dataset}: no valid '{column}' values remain to impute from")]
    EmptyMedian { dataset: String, column: String },

    #[error("DataFrame operation failed: {0}")]
    PolarsError(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, NormalizationError>;
