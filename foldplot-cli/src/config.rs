//! Configuration handling for the foldplot CLI
//!
//! Loaded from foldplot.toml (or `--config`); command-line flags override it.

use anyhow::{Context, Result};
use foldplot_core::{ColorMode, ComparisonKind, Orientation, PaletteSpec, PlotParams};
use foldplot_render::{ExportConfig, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

pub const DEFAULT_CONFIG_FILE: &str = "foldplot.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub plot: PlotConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Worker threads, 0 for all cores
    #[serde(default)]
    pub threads: usize,

    /// Directory plots are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotConfig {
    /// ColorBrewer palette name, e.g. Spectral_11
    #[serde(default = "default_palette")]
    pub palette: String,

    /// "+" or "-"
    #[serde(default = "default_orientation")]
    pub palette_orientation: String,

    /// equal-width, frequency or custom
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Interior breakpoints, only valid with mode = "custom"
    #[serde(default)]
    pub breakpoints: Vec<f64>,

    /// Explicit colors replacing the palette
    #[serde(default)]
    pub colors: Vec<String>,

    /// auto, self or pairwise
    #[serde(default = "default_comparison")]
    pub comparison: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderConfig {
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    #[serde(default = "default_formats")]
    pub formats: Vec<String>,

    /// Write the identity histogram
    #[serde(default = "default_true")]
    pub histogram: bool,

    #[serde(default = "default_true")]
    pub legend: bool,

    #[serde(default = "default_true")]
    pub axes: bool,

    #[serde(default)]
    pub grid: bool,

    #[serde(default = "default_font_family")]
    pub font_family: String,

    #[serde(default = "default_background")]
    pub background_color: String,
}

fn default_output_dir() -> PathBuf { PathBuf::from(".") }
fn default_palette() -> String { foldplot_core::palette::DEFAULT_PALETTE.to_string() }
fn default_orientation() -> String { "+".to_string() }
fn default_mode() -> String { "equal-width".to_string() }
fn default_comparison() -> String { "auto".to_string() }
fn default_dpi() -> u32 { 100 }
fn default_formats() -> Vec<String> { vec!["svg".to_string(), "png".to_string()] }
fn default_true() -> bool { true }
fn default_font_family() -> String { "DejaVu Sans, Arial, sans-serif".to_string() }
fn default_background() -> String { "#ffffff".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            output_dir: default_output_dir(),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            palette_orientation: default_orientation(),
            mode: default_mode(),
            breakpoints: Vec::new(),
            colors: Vec::new(),
            comparison: default_comparison(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            formats: default_formats(),
            histogram: true,
            legend: true,
            axes: true,
            grid: false,
            font_family: default_font_family(),
            background_color: default_background(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> CliResult<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }
}

impl PlotConfig {
    pub fn color_mode(&self) -> CliResult<ColorMode> {
        let mode = match self.mode.as_str() {
            "equal-width" | "equal" => ColorMode::EqualWidth,
            "frequency" | "freq" => ColorMode::Frequency,
            "custom" if self.breakpoints.is_empty() => {
                return Err(CliError::config("custom mode requires breakpoints"))
            }
            "custom" => return Ok(ColorMode::Custom(self.breakpoints.clone())),
            other => {
                return Err(CliError::config(format!(
                    "unknown color mode '{}', expected equal-width, frequency or custom",
                    other
                )))
            }
        };
        if !self.breakpoints.is_empty() {
            return Err(CliError::config(format!(
                "breakpoints cannot be combined with {} mode, set mode = \"custom\"",
                self.mode
            )));
        }
        Ok(mode)
    }

    pub fn comparison_kind(&self) -> CliResult<ComparisonKind> {
        match self.comparison.as_str() {
            "auto" => Ok(ComparisonKind::Auto),
            "self" => Ok(ComparisonKind::SelfComparison),
            "pairwise" => Ok(ComparisonKind::Pairwise),
            other => Err(CliError::config(format!(
                "unknown comparison '{}', expected auto, self or pairwise",
                other
            ))),
        }
    }

    pub fn palette_spec(&self) -> CliResult<PaletteSpec> {
        let orientation: Orientation = self
            .palette_orientation
            .parse()
            .map_err(CliError::config)?;
        Ok(PaletteSpec {
            name: self.palette.clone(),
            orientation,
            custom_colors: (!self.colors.is_empty()).then(|| self.colors.clone()),
        })
    }

    pub fn to_params(&self) -> CliResult<PlotParams> {
        Ok(PlotParams {
            palette: self.palette_spec()?,
            mode: self.color_mode()?,
            comparison: self.comparison_kind()?,
        })
    }
}

impl RenderConfig {
    pub fn to_export_config(&self) -> CliResult<ExportConfig> {
        let formats = self
            .formats
            .iter()
            .map(|f| match f.to_ascii_lowercase().as_str() {
                "svg" => Ok(OutputFormat::Svg),
                "png" => Ok(OutputFormat::Png),
                "pdf" => Ok(OutputFormat::Pdf),
                other => Err(CliError::config(format!(
                    "unsupported output format '{}', expected svg, png or pdf",
                    other
                ))),
            })
            .collect::<CliResult<Vec<_>>>()?;
        if formats.is_empty() {
            return Err(CliError::config("at least one output format is required"));
        }
        if self.dpi == 0 {
            return Err(CliError::config("dpi must be positive"));
        }

        Ok(ExportConfig {
            dpi: self.dpi,
            formats,
            histogram: self.histogram,
            show_legend: self.legend,
            show_axes: self.axes,
            show_grid: self.grid,
            background_color: self.background_color.clone(),
            font_family: self.font_family.clone(),
            provenance_comment: Some(format!("foldplot {}", foldplot_core::VERSION)),
            ..ExportConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.plot.palette, "Spectral_11");
        assert_eq!(config.render.dpi, 100);
        assert_eq!(config.plot.to_params().unwrap(), PlotParams::default());
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.plot.breakpoints = vec![90.0, 95.0];
        config.plot.palette = "Blues_3".into();
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded = Config::load_from_file(temp_file.path())?;
        assert_eq!(config, loaded);
        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[plot]\npalette = \"Reds_5\"\n").unwrap();
        assert_eq!(config.plot.palette, "Reds_5");
        assert_eq!(config.plot.mode, "equal-width");
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_example_toml_generation() {
        let example = Config::example_toml().unwrap();
        assert!(example.contains("[general]"));
        assert!(example.contains("[plot]"));
        assert!(example.contains("[render]"));
    }

    #[test]
    fn test_mode_resolution() {
        let mut plot = PlotConfig::default();
        assert_eq!(plot.color_mode().unwrap(), ColorMode::EqualWidth);
        plot.mode = "frequency".into();
        assert_eq!(plot.color_mode().unwrap(), ColorMode::Frequency);
        plot.breakpoints = vec![95.0];
        assert!(plot.color_mode().is_err());
        plot.mode = "equal-width".into();
        assert!(matches!(plot.color_mode(), Err(CliError::Config { .. })));
        plot.mode = "custom".into();
        assert_eq!(plot.color_mode().unwrap(), ColorMode::Custom(vec![95.0]));
        plot.breakpoints.clear();
        assert!(plot.color_mode().is_err());
        plot.mode = "bogus".into();
        assert!(plot.color_mode().is_err());
    }

    #[test]
    fn test_invalid_values() {
        let plot = PlotConfig {
            palette_orientation: "x".into(),
            ..Default::default()
        };
        assert!(matches!(plot.palette_spec(), Err(CliError::Config { .. })));

        let plot = PlotConfig {
            comparison: "both".into(),
            ..Default::default()
        };
        assert!(plot.comparison_kind().is_err());

        let render = RenderConfig {
            formats: vec!["tiff".into()],
            ..Default::default()
        };
        assert!(render.to_export_config().is_err());
    }

    #[test]
    fn test_export_config_conversion() {
        let render = RenderConfig {
            formats: vec!["SVG".into()],
            histogram: false,
            ..Default::default()
        };
        let export = render.to_export_config().unwrap();
        assert_eq!(export.formats, vec![OutputFormat::Svg]);
        assert!(!export.histogram);

        let render = RenderConfig {
            formats: vec!["png".into(), "pdf".into()],
            ..Default::default()
        };
        let export = render.to_export_config().unwrap();
        assert_eq!(export.formats, vec![OutputFormat::Png, OutputFormat::Pdf]);
    }
}
