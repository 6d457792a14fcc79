use std::io::{self, Write};

use anyhow::{Context, Result};
use comfy_table::Table;

use eurolife_cli::pipeline::run_pipeline;
use eurolife_cli::types::RunResult;
use eurolife_model::PipelineConfig;

use crate::cli::RunArgs;
use crate::summary::apply_table_style;

/// Builds the run configuration: defaults, then command-line overrides.
pub fn build_config(args: &RunArgs) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    if let Some(dir) = &args.input_dir {
        config = config.with_input_dir(dir);
    }
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    config
}

pub fn run(args: &RunArgs) -> RunResult {
    let config = build_config(args);
    run_pipeline(&config)
}

pub fn run_datasets() -> Result<()> {
    let config = PipelineConfig::default();
    let mut table = Table::new();
    table.set_header(vec!["Dataset", "Input file", "Value column", "Valid values"]);
    apply_table_style(&mut table);
    for spec in &config.datasets {
        table.add_row(vec![
            spec.name.clone(),
            spec.file_name.clone(),
            spec.value_name.clone(),
            spec.domain.to_string(),
        ]);
    }
    table.add_row(vec![
        "Geographic".to_string(),
        config.geometry.file_name.clone(),
        "-".to_string(),
        "-".to_string(),
    ]);

    let years: Vec<String> = config
        .normalization
        .target_years
        .iter()
        .map(|year| year.to_string())
        .collect();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{table}").context("write dataset table")?;
    writeln!(stdout, "Target years: {}", years.join(", ")).context("write target years")?;
    Ok(())
}
