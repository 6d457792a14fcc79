//! Role detection over a table schema.

use eurolife_model::YearRange;
use tracing::debug;

use crate::patterns::RolePatterns;
use crate::types::{ColumnSchema, DetectedColumn, DetectedRoles, DetectionMethod, TableSchema};

/// Classifies the columns of a table into country, time and value axes.
///
/// Detection runs in two passes:
///
/// 1. **Name matching**: every column is classified by [`RolePatterns`]; the
///    first column matching a role claims it and later matches are ignored.
/// 2. **Year-range fallback**: when no column was named like a time axis,
///    the first unassigned all-numeric column whose values all fall inside
///    the plausible year range becomes the time axis.
///
/// If the time axis is still missing afterwards the table is probably wide
/// (see [`crate::find_year_columns`]).
#[derive(Debug, Clone)]
pub struct ColumnRoleDetector {
    patterns: RolePatterns,
    year_range: YearRange,
}

impl ColumnRoleDetector {
    pub fn new(patterns: RolePatterns, year_range: YearRange) -> Self {
        Self {
            patterns,
            year_range,
        }
    }

    pub fn detect(&self, schema: &TableSchema) -> DetectedRoles {
        let mut roles = DetectedRoles::default();

        for column in &schema.columns {
            let Some(role) = self.patterns.classify(&column.name) else {
                continue;
            };
            let slot = roles.slot_mut(role);
            if slot.is_none() {
                *slot = Some(DetectedColumn {
                    index: column.index,
                    name: column.name.clone(),
                    method: DetectionMethod::Name,
                });
            } else {
                debug!(column = %column.name, role = %role, "role already assigned, ignoring column");
            }
        }

        if roles.time.is_none() {
            let fallback = schema
                .columns
                .iter()
                .filter(|column| !roles.is_assigned(column.index))
                .find(|column| self.looks_like_years(column))
                .map(|column| DetectedColumn {
                    index: column.index,
                    name: column.name.clone(),
                    method: DetectionMethod::YearRange,
                });
            roles.time = fallback;
        }

        roles
    }

    fn looks_like_years(&self, column: &ColumnSchema) -> bool {
        column.numeric.is_some_and(|summary| {
            summary.count > 0
                && self.year_range.contains(summary.min)
                && self.year_range.contains(summary.max)
        })
    }
}
