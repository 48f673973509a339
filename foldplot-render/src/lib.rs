//! foldplot plot export
//!
//! Builds backend-neutral scenes from a [`PlotOutput`] and writes them as SVG
//! documents, PNG images or (with the `pdf` feature) PDF pages.

pub mod pdf;
pub mod plots;
pub mod raster;
pub mod scene;
pub mod svg;

use anyhow::{Context, Result};
use foldplot_core::PlotOutput;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub use raster::Rasterizer;
pub use scene::{Scene, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Svg,
    Png,
    Pdf,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// The plots produced for a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotKind {
    /// Full dot matrix (`*_FULL` for self-comparisons)
    Dot,
    /// Folded self-identity plot (`*_TRI`)
    Triangle,
    /// Identity histogram (`*_HIST`)
    Histogram,
}

impl PlotKind {
    /// Physical size in inches
    pub fn default_size_inches(self) -> (f32, f32) {
        match self {
            PlotKind::Dot => (9.0, 9.0),
            PlotKind::Triangle => (9.0, 6.0),
            PlotKind::Histogram => (3.0, 3.0),
        }
    }

    pub fn canvas_size(self, dpi: u32) -> (u32, u32) {
        let (w, h) = self.default_size_inches();
        ((w * dpi as f32).round() as u32, (h * dpi as f32).round() as u32)
    }
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub dpi: u32,
    pub formats: Vec<OutputFormat>,
    pub histogram: bool,
    pub show_legend: bool,
    pub show_axes: bool,
    pub show_grid: bool,
    pub background_color: String,
    pub font_family: String,
    pub font_size: u32,
    /// Written as a comment at the top of SVG output
    pub provenance_comment: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dpi: 100,
            formats: vec![OutputFormat::Svg, OutputFormat::Png],
            histogram: true,
            show_legend: true,
            show_axes: true,
            show_grid: false,
            background_color: "#ffffff".to_string(),
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            font_size: 12,
            provenance_comment: None,
        }
    }
}

pub struct PlotExporter {
    config: ExportConfig,
}

impl PlotExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Base file name (no extension) shared by every plot of a dataset.
    ///
    /// Self-comparisons are named after the sequence, pairwise comparisons
    /// after `<query>_<reference>`. An explicit prefix replaces either.
    pub fn base_name(output: &PlotOutput, prefix: Option<&str>) -> String {
        if let Some(prefix) = prefix {
            return sanitize(prefix);
        }
        match output.sequence_names() {
            Some((query, _)) if output.is_self() => sanitize(query),
            Some((query, reference)) => format!("{}_{}", sanitize(query), sanitize(reference)),
            None => "foldplot".to_string(),
        }
    }

    /// Scenes for every plot of a dataset, paired with their file stem
    pub fn scenes(&self, output: &PlotOutput, base: &str) -> Vec<(String, PlotKind, Scene)> {
        let dpi = self.config.dpi;
        let mut scenes = Vec::new();

        let dot_name = if output.is_self() {
            format!("{}_FULL", base)
        } else {
            base.to_string()
        };
        scenes.push((
            dot_name,
            PlotKind::Dot,
            plots::dot_scene(
                &output.dot,
                &output.palette,
                &output.breakpoints,
                base,
                &self.config,
                PlotKind::Dot.canvas_size(dpi),
            ),
        ));

        if let Some(tri) = &output.diamonds {
            scenes.push((
                format!("{}_TRI", base),
                PlotKind::Triangle,
                plots::tri_scene(
                    tri,
                    &output.palette,
                    &output.breakpoints,
                    base,
                    &self.config,
                    PlotKind::Triangle.canvas_size(dpi),
                ),
            ));
        }

        if self.config.histogram {
            scenes.push((
                format!("{}_HIST", base),
                PlotKind::Histogram,
                plots::hist_scene(
                    &output.histogram,
                    &output.palette,
                    &self.config,
                    PlotKind::Histogram.canvas_size(dpi),
                ),
            ));
        }
        scenes
    }

    /// Write every plot in every configured format; returns the written paths
    pub fn export<P: AsRef<Path>>(
        &self,
        output: &PlotOutput,
        out_dir: P,
        prefix: Option<&str>,
    ) -> Result<Vec<PathBuf>> {
        let out_dir = out_dir.as_ref();
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

        let base = Self::base_name(output, prefix);
        let mut rasterizer: Option<Rasterizer> = None;
        let mut written = Vec::new();
        for (stem, kind, scene) in self.scenes(output, &base) {
            for format in &self.config.formats {
                let path = out_dir.join(format!("{}.{}", stem, format.extension()));
                match format {
                    OutputFormat::Svg => svg::write_svg(&scene, &self.config, &path)?,
                    OutputFormat::Png => rasterizer
                        .get_or_insert_with(Rasterizer::new)
                        .write_png(&scene, &self.config, &path)?,
                    OutputFormat::Pdf => pdf::write_pdf(&scene, &self.config, &path)?,
                }
                log::debug!("Wrote {:?} plot to {}", kind, path.display());
                written.push(path);
            }
        }
        log::info!("Saved {} plot file(s) to {}", written.len(), out_dir.display());
        Ok(written)
    }
}

fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "foldplot".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_sizes() {
        assert_eq!(PlotKind::Dot.canvas_size(100), (900, 900));
        assert_eq!(PlotKind::Triangle.canvas_size(100), (900, 600));
        assert_eq!(PlotKind::Histogram.canvas_size(300), (900, 900));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("chr1:100-200"), "chr1_100-200");
        assert_eq!(sanitize("hap/1"), "hap_1");
        assert_eq!(sanitize(""), "foldplot");
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(OutputFormat::Png.to_string(), "png");
        assert_eq!(OutputFormat::Svg.extension(), "svg");
        assert_eq!(OutputFormat::Pdf.extension(), "pdf");
    }
}
