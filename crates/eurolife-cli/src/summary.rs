use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use eurolife_validate::{ConsistencyReport, DatasetCoverage};

use eurolife_cli::types::{DatasetSummary, RunResult, StageStatus};

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input_dir.display());
    println!("Output: {}", result.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Value"),
        header_cell("Records"),
        header_cell("Countries"),
        header_cell("Years"),
        header_cell("Imputed"),
        header_cell("Status"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);

    let mut total_records = 0usize;
    for summary in &result.datasets {
        total_records += summary.records;
        table.add_row(dataset_row(summary));
    }
    if let Some(geometry) = &result.geometry {
        table.add_row(vec![
            Cell::new("Geographic")
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            Cell::new(geometry.features),
            Cell::new(geometry.report.with_code),
            dim_cell("-"),
            dim_cell("-"),
            status_cell(if geometry.output.is_some() {
                StageStatus::Written
            } else {
                StageStatus::WriteFailed
            }),
            path_cell(geometry.output.as_deref()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    for report in &result.consistency {
        print_consistency(report);
    }
    if result.consistency.is_empty() {
        println!();
        println!("Consistency: not checked (fewer than two datasets were normalized)");
    } else if result.consistency_passed() {
        println!();
        println!("Consistency: passed");
    } else {
        println!();
        println!("Consistency: warnings, check the coverage tables above");
    }

    if result.has_errors() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn dataset_row(summary: &DatasetSummary) -> Vec<Cell> {
    let imputed = summary.report.as_ref().map(|report| report.imputed());
    vec![
        Cell::new(&summary.name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(&summary.value_name),
        Cell::new(summary.records),
        Cell::new(summary.countries),
        Cell::new(join(&summary.years)),
        count_cell(imputed, Color::Yellow),
        status_cell(summary.status),
        path_cell(summary.output.as_deref()),
    ]
}

fn print_consistency(report: &ConsistencyReport) {
    println!();
    println!("Coverage: {} vs {}", report.left.name, report.right.name);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell(&report.left.name),
        header_cell(&report.right.name),
        header_cell("Common"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Countries"),
        Cell::new(report.left.countries.len()),
        Cell::new(report.right.countries.len()),
        check_cell(report.common_countries.len(), report.countries_ok()),
        dim_cell(report.thresholds.min_common_countries),
    ]);
    table.add_row(vec![
        Cell::new("Years"),
        Cell::new(join(&report.left.years)),
        Cell::new(join(&report.right.years)),
        check_cell(join(&report.common_years), report.years_ok()),
        dim_cell(report.thresholds.min_common_years),
    ]);
    table.add_row(vec![
        Cell::new("Value range"),
        Cell::new(range(&report.left)),
        Cell::new(range(&report.right)),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    print_only_in(&report.left.name, &report.countries_only_left);
    print_only_in(&report.right.name, &report.countries_only_right);
}

fn print_only_in(name: &str, countries: &BTreeSet<String>) {
    if !countries.is_empty() {
        println!("Only in {name}: {}", join(countries));
    }
}

fn range(coverage: &DatasetCoverage) -> String {
    match coverage.value_range {
        Some((min, max)) => format!("{min:.2} .. {max:.2}"),
        None => "-".to_string(),
    }
}

fn join<T: Display>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: StageStatus) -> Cell {
    match status {
        StageStatus::Written => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        StageStatus::MissingFile => Cell::new(status.label()).fg(Color::Yellow),
        _ => Cell::new(status.label()).fg(Color::Red),
    }
}

fn check_cell<T: Display>(value: T, ok: bool) -> Cell {
    let cell = Cell::new(value).add_attribute(Attribute::Bold);
    if ok {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::Red)
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn path_cell(path: Option<&Path>) -> Cell {
    match path.and_then(Path::file_name) {
        Some(name) => Cell::new(name.to_string_lossy()),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: Display>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
