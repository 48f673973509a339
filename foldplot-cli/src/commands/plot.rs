//! Plot command: run the pipeline and export every plot for one dataset

use clap::Args;
use foldplot_core::{Pipeline, PlotOutput};
use foldplot_render::PlotExporter;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use super::PipelineArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::input::read_table;

#[derive(Args, Debug, Clone)]
pub struct PlotArgs {
    #[command(flatten)]
    pub pipeline: PipelineArgs,

    /// Output directory (defaults to general.output_dir)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// File name prefix replacing the sequence-derived name
    #[arg(long)]
    pub prefix: Option<String>,

    /// Output formats (comma separated: svg, png, pdf with the `pdf` feature)
    #[arg(long, value_delimiter = ',')]
    pub format: Vec<String>,

    /// Raster resolution
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Skip the identity histogram
    #[arg(long)]
    pub no_hist: bool,

    /// Also dump the computed plot data as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

pub fn execute(config: &Config, args: PlotArgs) -> CliResult<Vec<PathBuf>> {
    let mut config = config.clone();
    args.pipeline.apply(&mut config.plot);
    if !args.format.is_empty() {
        config.render.formats = args.format.clone();
    }
    if let Some(dpi) = args.dpi {
        config.render.dpi = dpi;
    }
    if args.no_hist {
        config.render.histogram = false;
    }

    let params = config.plot.to_params()?;
    let export_config = config.render.to_export_config()?;
    let out_dir = args.out_dir.unwrap_or_else(|| config.general.output_dir.clone());

    log::info!("Reading alignments from {}", args.pipeline.input.display());
    let table = read_table(&args.pipeline.input)?;
    let output = Pipeline::new(params).run(&table)?;
    log_summary(&output);

    if let Some(json_path) = &args.json {
        write_json(&output, json_path)?;
    }

    let exporter = PlotExporter::new(export_config);
    let written = exporter
        .export(&output, &out_dir, args.prefix.as_deref())
        .map_err(|e| CliError::rendering(format!("{:#}", e)))?;

    for path in &written {
        log::info!("Saved {}", path.display());
    }
    Ok(written)
}

fn log_summary(output: &PlotOutput) {
    log::info!(
        "{} comparison: {} alignments, {} dot tiles, window {} bp",
        output.comparison,
        output.records.len(),
        output.dot.tiles.len(),
        output.dot.window
    );
    if let Some(tri) = &output.diamonds {
        log::info!("Triangle plot: {} diamonds", tri.num_polygons());
    }
    log::debug!("Breakpoints: {:?}", output.breakpoints.edges());
}

fn write_json(output: &PlotOutput, path: &Path) -> CliResult<()> {
    let file = File::create(path)
        .map_err(|e| CliError::io(format!("Failed to create {}: {}", path.display(), e)))?;
    serde_json::to_writer_pretty(BufWriter::new(file), output)?;
    log::info!("Wrote plot data to {}", path.display());
    Ok(())
}
