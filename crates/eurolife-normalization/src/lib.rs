//! Dataset normalization for the eurolife pipeline.
//!
//! Turns a raw statistical table into a canonical `(country, year, value)`
//! dataset and rewrites boundary feature properties to canonical keys.
//!
//! # Overview
//!
//! - **Country codes**: collapse source aliases to one code per country
//! - **Reshaping**: pivot year-labeled columns into long-form rows
//! - **Normalization**: detect, rename, filter, coerce and impute one dataset
//! - **Geometry**: derive `country_code` / `country_name` feature properties
//!
//! # Example
//!
//! ```ignore
//! use eurolife_model::{DatasetSpec, NormalizationOptions};
//! use eurolife_normalization::DatasetNormalizer;
//!
//! let options = NormalizationOptions::default();
//! let normalized = DatasetNormalizer::new(&options)
//!     .normalize(raw_df, &DatasetSpec::life_satisfaction())?;
//! println!("{} records", normalized.dataset.len());
//! ```

mod country;
mod dataset;
mod error;
mod geometry;
mod impute;
mod report;
mod wide;

pub use country::CountryCodeNormalizer;
pub use dataset::{DatasetNormalizer, NormalizedDataset};
pub use error::{NormalizationError, Result};
pub use geometry::{COUNTRY_CODE_KEY, COUNTRY_NAME_KEY, GeometryNormalizer, GeometryReport};
pub use impute::{ImputationOutcome, impute_group_medians, median};
pub use report::NormalizationReport;
pub use wide::{YEAR_COLUMN, reshape_wide_to_long};
