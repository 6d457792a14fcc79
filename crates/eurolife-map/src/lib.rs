//! Column role detection.
//!
//! Statistical tables published by different agencies name the same axis in
//! different ways (`geo`, `GEO`, `geo\time`, `country`; `TIME_PERIOD`,
//! `year`; `OBS_VALUE`, `values`, ...). This crate classifies the columns of
//! a table into the country, time and measurement axes from a typed schema
//! description, and finds year-labeled columns in wide tables.

mod detect;
mod patterns;
mod types;
mod wide;

pub use detect::ColumnRoleDetector;
pub use patterns::{COUNTRY_CANDIDATES, RolePatterns, TIME_CANDIDATES};
pub use types::{
    ColumnRole, ColumnSchema, DetectedColumn, DetectedRoles, DetectionMethod, NumericSummary,
    TableSchema,
};
pub use wide::{YearColumn, find_year_columns};
