//! Consistency checks between canonical datasets.
//!
//! The checks are advisory: a failing report is surfaced to the caller as a
//! warning and never blocks persistence.

mod consistency;

pub use consistency::{ConsistencyReport, DatasetCoverage, validate_consistency};
