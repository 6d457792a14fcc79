use std::path::PathBuf;

use thiserror::Error;

/// Failure writing an output file.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: polars::prelude::PolarsError,
    },

    #[error("failed to encode JSON {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl OutputError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::CreateDir { path, .. }
            | Self::Write { path, .. }
            | Self::Csv { path, .. }
            | Self::Json { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
