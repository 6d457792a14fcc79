//! Feature collection -> JSON document.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use eurolife_model::FeatureCollection;
use tracing::info;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Writes `collection` as pretty-printed JSON at `path`.
pub fn write_feature_collection(path: &Path, collection: &FeatureCollection) -> Result<()> {
    ensure_parent_dir(path)?;
    let write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, collection).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(write_error)?;

    info!(path = %path.display(), features = collection.len(), "wrote boundary document");
    Ok(())
}
