//! Inspect command: summarize a table without writing plots

use clap::Args;
use foldplot_core::classify::class_counts;
use foldplot_core::palette::PaletteFamily;
use foldplot_core::{detect_schema, Pipeline};
use serde::Serialize;

use super::PipelineArgs;
use crate::config::Config;
use crate::error::CliResult;
use crate::input::read_table;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub schema: String,
    pub records: usize,
    pub comparison: String,
    pub palette: String,
    pub palette_family: Option<PaletteFamily>,
    pub colors: Vec<String>,
    pub breakpoints: Vec<f64>,
    pub class_counts: Vec<usize>,
    pub window: u64,
    pub max_extent: u64,
    pub identity_display_range: (f64, f64),
}

pub fn build_report(config: &Config, args: &InspectArgs) -> CliResult<InspectReport> {
    let mut config = config.clone();
    args.pipeline.apply(&mut config.plot);
    let params = config.plot.to_params()?;

    let table = read_table(&args.pipeline.input)?;
    let schema = detect_schema(&table)?.schema;
    let output = Pipeline::new(params).run(&table)?;
    let counts = class_counts(&output.records, output.breakpoints.num_classes());

    Ok(InspectReport {
        schema: schema.to_string(),
        records: output.records.len(),
        comparison: output.comparison.to_string(),
        palette: output.palette.name.clone(),
        palette_family: output.palette.family,
        colors: output.palette.colors.clone(),
        breakpoints: output.breakpoints.edges().to_vec(),
        class_counts: counts,
        window: output.dot.window,
        max_extent: output.dot.max_extent,
        identity_display_range: (output.histogram.display_min, output.histogram.display_max),
    })
}

pub fn execute(config: &Config, args: InspectArgs) -> CliResult<()> {
    let report = build_report(config, &args)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Input:       {}", args.pipeline.input.display());
    println!("Schema:      {}", report.schema);
    println!("Records:     {}", report.records);
    println!("Comparison:  {}", report.comparison);
    println!("Window:      {} bp", report.window);
    println!("Extent:      {} bp", report.max_extent);
    match report.palette_family {
        Some(family) => println!(
            "Palette:     {} ({}, {} colors)",
            report.palette,
            family,
            report.colors.len()
        ),
        None => println!("Palette:     {} ({} colors)", report.palette, report.colors.len()),
    }
    println!(
        "Histogram:   {:.2} - {:.0} % identity shown",
        report.identity_display_range.0, report.identity_display_range.1
    );
    println!("Classes:");
    for (class, count) in report.class_counts.iter().enumerate() {
        let lo = report.breakpoints.get(class).copied().unwrap_or(f64::NAN);
        let hi = report.breakpoints.get(class + 1).copied().unwrap_or(lo);
        let color = report.colors.get(class).map(String::as_str).unwrap_or("-");
        println!("  {:>2}  {:>7.3} - {:<7.3}  {:<8} {}", class, lo, hi, color, count);
    }
    Ok(())
}
