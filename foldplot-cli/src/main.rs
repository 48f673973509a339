use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod input;

use commands::inspect::InspectArgs;
use commands::plot::PlotArgs;
use config::Config;
use error::{print_error_and_exit, CliError, CliResult};

#[derive(Parser)]
#[command(name = "foldplot")]
#[command(about = "foldplot - identity-colored dot plots and folded self-identity plots")]
#[command(version)]
#[command(long_about = "
foldplot turns alignment tables with per-interval identity estimates into
identity-colored dot plots, folded (triangle) self-identity plots and
identity histograms.

Examples:
  foldplot plot --input chr8.bed --out-dir plots
  foldplot plot --input hap1_hap2.bed.gz --palette Blues_7 --freq --format svg
  foldplot inspect --input chr8.bed --palette Reds_5 --breakpoints 90,95,98,99
  foldplot palettes
  foldplot config --example > foldplot.toml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    threads: Option<usize>,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write dot, triangle and histogram plots for an alignment table
    Plot(PlotArgs),

    /// Print schema, breakpoints and class counts for an alignment table
    Inspect(InspectArgs),

    /// List the built-in palettes by family
    Palettes,

    /// Show or write configuration
    Config {
        /// Print an example configuration with every default
        #[arg(long)]
        example: bool,

        /// Write the effective configuration to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> CliResult<()> {
    let config = Config::load(cli.config.as_deref())
        .map_err(|e| CliError::config(format!("{:#}", e)))?;

    let threads = cli.threads.unwrap_or(config.general.threads);
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| CliError::config(format!("Failed to set thread count: {}", e)))?;
    }

    match cli.command {
        Commands::Plot(args) => {
            commands::plot::execute(&config, args)?;
        }
        Commands::Inspect(args) => commands::inspect::execute(&config, args)?,
        Commands::Palettes => commands::palettes::execute(),
        Commands::Config { example, output } => {
            if example {
                print!("{}", Config::example_toml()?);
            } else if let Some(path) = output {
                config
                    .save_to_file(&path)
                    .map_err(|e| CliError::io(format!("{:#}", e)))?;
                log::info!("Configuration written to {}", path.display());
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(err) = run(cli) {
        print_error_and_exit(&err);
    }
}
