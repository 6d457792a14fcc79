use std::path::Path;

use eurolife_model::FeatureCollection;
use tracing::info;

use crate::error::{IngestError, Result};

/// Reads a feature-collection document.
pub fn read_feature_collection(path: &Path) -> Result<FeatureCollection> {
    let contents = std::fs::read_to_string(path).map_err(|e| IngestError::open(path, e))?;
    let collection: FeatureCollection =
        serde_json::from_str(&contents).map_err(|e| IngestError::DocumentParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    info!(
        path = %path.display(),
        kind = collection.kind.as_deref().unwrap_or("Unknown"),
        features = collection.len(),
        "feature collection loaded"
    );
    Ok(collection)
}
