//! Wide-to-long reshaping.

use std::collections::BTreeSet;

use eurolife_common::{any_to_string_non_empty, column_cells};
use eurolife_map::YearColumn;
use polars::prelude::*;
use tracing::{debug, info};

use crate::error::Result;

/// Name of the year column produced by [`reshape_wide_to_long`].
pub const YEAR_COLUMN: &str = "year";

/// Pivots year-labeled columns into `(id..., year, <value_name>)` rows.
///
/// Every non-year column is an id column and is repeated on each emitted row.
/// Rows are emitted year-major: all source rows for the first year column,
/// then all rows for the next. An input of `R` rows and `Y` year columns
/// yields exactly `R * Y` rows.
///
/// Id columns whose name collides with `year` or `value_name` are dropped.
/// Cells are carried as text; coercion happens later in normalization.
pub fn reshape_wide_to_long(
    df: &DataFrame,
    year_columns: &[YearColumn],
    value_name: &str,
) -> Result<DataFrame> {
    let year_names: BTreeSet<&str> = year_columns.iter().map(|c| c.name.as_str()).collect();
    let mut id_names = Vec::new();
    for name in df.get_column_names() {
        let name = name.as_str();
        if year_names.contains(name) {
            continue;
        }
        if name == YEAR_COLUMN || name == value_name {
            info!(column = name, "dropping id column that collides with a reshaped column");
            continue;
        }
        id_names.push(name.to_string());
    }

    let height = df.height();
    let total = height * year_columns.len();
    let id_cells: Vec<Vec<AnyValue<'_>>> = id_names
        .iter()
        .map(|name| column_cells(df, name).unwrap_or_default())
        .collect();

    let mut id_values: Vec<Vec<Option<String>>> = id_names
        .iter()
        .map(|_| Vec::with_capacity(total))
        .collect();
    let mut years: Vec<i32> = Vec::with_capacity(total);
    let mut values: Vec<Option<String>> = Vec::with_capacity(total);

    for year_column in year_columns {
        let cells = column_cells(df, &year_column.name).unwrap_or_default();
        for row in 0..height {
            for (target, source) in id_values.iter_mut().zip(&id_cells) {
                target.push(source.get(row).cloned().and_then(any_to_string_non_empty));
            }
            years.push(year_column.year);
            values.push(cells.get(row).cloned().and_then(any_to_string_non_empty));
        }
    }

    let mut columns: Vec<Column> = id_names
        .iter()
        .zip(id_values)
        .map(|(name, cells)| Series::new(name.as_str().into(), cells).into_column())
        .collect();
    columns.push(Series::new(YEAR_COLUMN.into(), years).into_column());
    columns.push(Series::new(value_name.into(), values).into_column());

    debug!(
        input_rows = height,
        year_columns = year_columns.len(),
        output_rows = total,
        "reshaped wide table"
    );
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use eurolife_map::find_year_columns;
    use eurolife_model::TargetYears;
    use polars::df;

    use super::*;

    fn text(df: &DataFrame, column: &str) -> Vec<Option<String>> {
        column_cells(df, column)
            .unwrap()
            .into_iter()
            .map(any_to_string_non_empty)
            .collect()
    }

    #[test]
    fn reshapes_year_major() {
        let df = df! {
            "geo" => &["DE", "EL"],
            "unit" => &["RTG", "RTG"],
            "2013" => &["7.2", "6.1"],
            "2018" => &["7.5", ":"],
        }
        .unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let year_columns = find_year_columns(&names, &TargetYears::default());

        let long = reshape_wide_to_long(&df, &year_columns, "life_satisfaction").unwrap();

        assert_eq!(long.height(), 4);
        assert_eq!(
            long.get_column_names()
                .iter()
                .map(|name| name.as_str())
                .collect::<Vec<_>>(),
            vec!["geo", "unit", "year", "life_satisfaction"]
        );
        assert_eq!(
            text(&long, "geo"),
            vec![
                Some("DE".to_string()),
                Some("EL".to_string()),
                Some("DE".to_string()),
                Some("EL".to_string())
            ]
        );
        assert_eq!(
            text(&long, "year"),
            vec![
                Some("2013".to_string()),
                Some("2013".to_string()),
                Some("2018".to_string()),
                Some("2018".to_string())
            ]
        );
        assert_eq!(text(&long, "life_satisfaction")[3], Some(":".to_string()));
    }

    #[test]
    fn drops_colliding_id_columns() {
        let df = df! {
            "geo" => &["DE"],
            "year" => &["x"],
            "2013" => &["7.2"],
        }
        .unwrap();
        let year_columns = vec![YearColumn {
            index: 2,
            name: "2013".to_string(),
            year: 2013,
        }];

        let long = reshape_wide_to_long(&df, &year_columns, "life_satisfaction").unwrap();

        assert_eq!(long.width(), 3);
        assert_eq!(long.height(), 1);
    }

    #[test]
    fn empty_table_yields_no_rows() {
        let df = df! {
            "geo" => Vec::<String>::new(),
            "2013" => Vec::<String>::new(),
        }
        .unwrap();
        let year_columns = vec![YearColumn {
            index: 1,
            name: "2013".to_string(),
            year: 2013,
        }];

        let long = reshape_wide_to_long(&df, &year_columns, "v").unwrap();

        assert_eq!(long.height(), 0);
        assert_eq!(long.width(), 3);
    }
}
