//! Command implementations for the foldplot CLI

pub mod inspect;
pub mod palettes;
pub mod plot;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::config::PlotConfig;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    EqualWidth,
    Frequency,
    Custom,
}

impl ModeArg {
    fn as_config(self) -> &'static str {
        match self {
            ModeArg::EqualWidth => "equal-width",
            ModeArg::Frequency => "frequency",
            ModeArg::Custom => "custom",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonArg {
    Auto,
    #[value(name = "self")]
    SelfComparison,
    Pairwise,
}

impl ComparisonArg {
    fn as_config(self) -> &'static str {
        match self {
            ComparisonArg::Auto => "auto",
            ComparisonArg::SelfComparison => "self",
            ComparisonArg::Pairwise => "pairwise",
        }
    }
}

/// Input and classification options shared by `plot` and `inspect`
#[derive(Args, Debug, Clone)]
pub struct PipelineArgs {
    /// Alignment table (TSV/BED-like, optionally gzip-compressed)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Palette name, e.g. Spectral_11, Blues_7, Set1_5
    #[arg(short, long)]
    pub palette: Option<String>,

    /// Palette orientation ('+' or '-')
    #[arg(long, allow_hyphen_values = true)]
    pub palette_orientation: Option<String>,

    /// Explicit colors replacing the palette (comma separated hex codes)
    #[arg(long, value_delimiter = ',')]
    pub colors: Vec<String>,

    /// Breakpoint strategy
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Shortcut for --mode frequency
    #[arg(long, conflicts_with = "mode")]
    pub freq: bool,

    /// Interior identity breakpoints (comma separated, selects custom mode)
    #[arg(long, value_delimiter = ',')]
    pub breakpoints: Vec<f64>,

    /// Comparison kind
    #[arg(long, value_enum)]
    pub comparison: Option<ComparisonArg>,
}

impl PipelineArgs {
    /// Overlay command-line values on the configured plot section
    pub fn apply(&self, plot: &mut PlotConfig) {
        if let Some(palette) = &self.palette {
            plot.palette = palette.clone();
        }
        if let Some(orientation) = &self.palette_orientation {
            plot.palette_orientation = orientation.clone();
        }
        if !self.colors.is_empty() {
            plot.colors = self.colors.clone();
        }
        if let Some(mode) = self.mode {
            plot.mode = mode.as_config().to_string();
        }
        if self.freq {
            plot.mode = ModeArg::Frequency.as_config().to_string();
        }
        if !self.breakpoints.is_empty() {
            plot.breakpoints = self.breakpoints.clone();
            if self.mode.is_none() && !self.freq {
                plot.mode = ModeArg::Custom.as_config().to_string();
            }
        }
        if let Some(comparison) = self.comparison {
            plot.comparison = comparison.as_config().to_string();
        }
    }
}
