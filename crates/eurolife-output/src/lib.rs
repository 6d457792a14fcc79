//! Persistence of normalized outputs.
//!
//! Each writer creates its target directory and reports failures as
//! [`OutputError`]; nothing here retries or removes partial files.

mod common;
mod csv;
mod error;
mod geojson;

pub use common::ensure_output_dir;
pub use csv::{dataset_to_frame, write_dataset_csv};
pub use error::{OutputError, Result};
pub use geojson::write_feature_collection;
