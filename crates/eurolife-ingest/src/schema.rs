//! Typed schema description consumed by role detection.

use eurolife_common::{any_is_missing, any_to_f64};
use eurolife_map::{ColumnSchema, NumericSummary, TableSchema};
use polars::prelude::{AnyValue, Column, DataFrame};

/// Describes every column of `df`, in order.
pub fn build_table_schema(df: &DataFrame) -> TableSchema {
    let columns = df
        .get_columns()
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let schema = ColumnSchema::new(index, column.name().to_string());
            match summarize_column(column) {
                Some(summary) => schema.with_numeric(summary),
                None => schema,
            }
        })
        .collect();
    TableSchema::new(columns)
}

/// Range of a column when all of its non-missing cells are numeric.
///
/// Returns `None` for columns with no values or any non-numeric value.
pub fn summarize_column(column: &Column) -> Option<NumericSummary> {
    let mut summary: Option<NumericSummary> = None;
    for idx in 0..column.len() {
        let cell = column.get(idx).unwrap_or(AnyValue::Null);
        if any_is_missing(&cell) {
            continue;
        }
        let value = any_to_f64(cell)?;
        summary = Some(match summary {
            Some(current) => NumericSummary {
                min: current.min.min(value),
                max: current.max.max(value),
                count: current.count + 1,
            },
            None => NumericSummary {
                min: value,
                max: value,
                count: 1,
            },
        });
    }
    summary
}
