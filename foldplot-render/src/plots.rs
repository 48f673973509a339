//! Scene construction for the three plot kinds

use crate::scene::{format_mbp, format_tick, nice_ticks, PlotArea, Scene, Shape, TextAnchor};
use crate::ExportConfig;
use foldplot_core::classify::Breakpoints;
use foldplot_core::{DiamondProjection, DotProjection, Histogram, Palette};

pub const POSITION_LABEL: &str = "Genomic Position (Mbp)";
pub const IDENTITY_LABEL: &str = "% Identity Estimate";
pub const COUNT_LABEL: &str = "# of Estimates";

const AXIS_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#dddddd";
const EMPTY_BIN_COLOR: &str = "#999999";
const DESIRED_TICKS: usize = 5;

/// Shared drawing state for one canvas
struct Canvas<'a> {
    config: &'a ExportConfig,
    scene: Scene,
    font_size: f32,
}

impl<'a> Canvas<'a> {
    fn new(config: &'a ExportConfig, width: u32, height: u32) -> Self {
        // Font scales with the canvas so small histograms stay readable
        let font_size = (width.min(height) as f32 / 45.0).max(config.font_size as f32 * 0.75);
        Self {
            config,
            scene: Scene::new(width, height, &config.background_color),
            font_size,
        }
    }

    fn text(&mut self, x: f32, y: f32, text: String, scale: f32, anchor: TextAnchor, vertical: bool) {
        self.scene.push(Shape::Text {
            x,
            y,
            text,
            size: self.font_size * scale,
            anchor,
            vertical,
            bold: false,
        });
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, stroke: &str, width: f32) {
        self.scene.push(Shape::Line {
            x1,
            y1,
            x2,
            y2,
            stroke: stroke.to_string(),
            width,
        });
    }

    fn title(&mut self, title: &str) {
        self.scene.push(Shape::Text {
            x: self.scene.width as f32 / 2.0,
            y: self.font_size * 1.6,
            text: title.to_string(),
            size: self.font_size * 1.2,
            anchor: TextAnchor::Middle,
            vertical: false,
            bold: true,
        });
    }

    fn x_axis<F: Fn(f64) -> String>(&mut self, area: &PlotArea, fmt: F, tick_labels: bool) {
        self.line(area.left, area.bottom, area.right, area.bottom, AXIS_COLOR, 1.0);
        for t in nice_ticks(area.x_range.0, area.x_range.1, DESIRED_TICKS) {
            let x = area.to_px_x(t);
            if self.config.show_grid {
                self.line(x, area.top, x, area.bottom, GRID_COLOR, 0.5);
            }
            self.line(x, area.bottom, x, area.bottom + 5.0, AXIS_COLOR, 1.0);
            if tick_labels {
                self.text(x, area.bottom + 5.0 + self.font_size, fmt(t), 0.8, TextAnchor::Middle, false);
            }
        }
    }

    fn x_label(&mut self, area: &PlotArea, label: &str) {
        let y = self.scene.height as f32 - self.font_size * 0.6;
        self.text((area.left + area.right) / 2.0, y, label.to_string(), 1.0, TextAnchor::Middle, false);
    }

    fn y_axis<F: Fn(f64) -> String>(&mut self, area: &PlotArea, fmt: F, tick_labels: bool) {
        self.line(area.left, area.top, area.left, area.bottom, AXIS_COLOR, 1.0);
        for t in nice_ticks(area.y_range.0, area.y_range.1, DESIRED_TICKS) {
            let y = area.to_px_y(t);
            if self.config.show_grid {
                self.line(area.left, y, area.right, y, GRID_COLOR, 0.5);
            }
            self.line(area.left - 5.0, y, area.left, y, AXIS_COLOR, 1.0);
            if tick_labels {
                self.text(area.left - 8.0, y + self.font_size * 0.3, fmt(t), 0.8, TextAnchor::End, false);
            }
        }
    }

    fn y_label(&mut self, area: &PlotArea, label: &str) {
        let x = self.font_size;
        self.text(x, (area.top + area.bottom) / 2.0, label.to_string(), 1.0, TextAnchor::Middle, true);
    }

    /// Facet strip above a panel column
    fn column_strip(&mut self, area: &PlotArea, label: &str) {
        let y = area.top - self.font_size * 0.5;
        self.text((area.left + area.right) / 2.0, y, label.to_string(), 0.8, TextAnchor::Middle, false);
    }

    /// Facet strip right of a panel row
    fn row_strip(&mut self, area: &PlotArea, label: &str) {
        let x = area.right + self.font_size * 1.1;
        self.text(x, (area.top + area.bottom) / 2.0, label.to_string(), 0.8, TextAnchor::Middle, true);
    }

    /// Color key: one swatch per class with its lower breakpoint
    fn legend(&mut self, area: &PlotArea, palette: &Palette, breakpoints: &Breakpoints) {
        let edges = breakpoints.edges();
        let classes = breakpoints.num_classes();
        let swatch = self.font_size;
        let x = area.right - swatch * 6.0;
        let mut y = area.top + swatch * 0.5;
        for class in (0..classes).rev() {
            self.scene.push(Shape::Rect {
                x,
                y,
                width: swatch,
                height: swatch,
                fill: palette.color(class).to_string(),
            });
            let label = match (edges.get(class), edges.get(class + 1)) {
                (Some(lo), Some(hi)) => format!("{}-{}", format_tick(*lo), format_tick(*hi)),
                (Some(lo), None) => format_tick(*lo),
                _ => String::new(),
            };
            self.text(x + swatch * 1.3, y + swatch * 0.8, label, 0.7, TextAnchor::Start, false);
            y += swatch * 1.2;
        }
    }

    fn finish(self) -> Scene {
        self.scene
    }
}

/// Dot matrix faceted by sequence pair: one panel per (reference, query),
/// references as rows and queries as columns, all sharing both axes in Mbp
pub fn dot_scene(
    dot: &DotProjection,
    palette: &Palette,
    breakpoints: &Breakpoints,
    title: &str,
    config: &ExportConfig,
    size: (u32, u32),
) -> Scene {
    let mut canvas = Canvas::new(config, size.0, size.1);
    let range = dot.axis_range();
    let extent = range.1;
    let mut outer = PlotArea::with_margins(size.0, size.1, range, range);

    let panels = dot.panels();
    let mut queries: Vec<&str> = panels.iter().map(|p| p.query_name.as_str()).collect();
    let mut refs: Vec<&str> = panels.iter().map(|p| p.ref_name.as_str()).collect();
    queries.sort_unstable();
    queries.dedup();
    refs.sort_unstable();
    refs.dedup();
    let (rows, cols) = (refs.len().max(1), queries.len().max(1));
    let faceted = panels.len() > 1;
    if faceted {
        outer.top += canvas.font_size * 1.4;
        outer.right -= canvas.font_size * 1.8;
    }
    let gap = if faceted { canvas.font_size * 0.8 } else { 0.0 };

    let mut cells: Vec<(usize, usize, Vec<usize>)> = panels
        .iter()
        .map(|panel| {
            let row = refs.binary_search(&panel.ref_name.as_str()).unwrap_or(0);
            let col = queries.binary_search(&panel.query_name.as_str()).unwrap_or(0);
            (row, col, panel.tile_indices.clone())
        })
        .collect();
    if cells.is_empty() {
        cells.push((0, 0, Vec::new()));
    }

    for (row, col, tile_indices) in &cells {
        let area = outer.cell(*row, *col, rows, cols, gap);
        if config.show_axes {
            canvas.x_axis(&area, format_mbp, *row == rows - 1);
            canvas.y_axis(&area, format_mbp, *col == 0);
        }
        for tile in tile_indices.iter().filter_map(|&i| dot.tiles.get(i)) {
            let Some(rect) = tile.clipped(extent) else {
                continue;
            };
            let (x0, x1) = (area.to_px_x(rect.x0), area.to_px_x(rect.x1));
            let (y_top, y_bottom) = (area.to_px_y(rect.y1), area.to_px_y(rect.y0));
            canvas.scene.push(Shape::Rect {
                x: x0,
                y: y_top,
                width: (x1 - x0).max(0.5),
                height: (y_bottom - y_top).max(0.5),
                fill: palette.color(tile.color_class).to_string(),
            });
        }
    }

    if faceted {
        for (col, query) in queries.iter().enumerate() {
            canvas.column_strip(&outer.cell(0, col, rows, cols, gap), query);
        }
        for (row, reference) in refs.iter().enumerate() {
            canvas.row_strip(&outer.cell(row, cols - 1, rows, cols, gap), reference);
        }
    }
    if config.show_axes {
        canvas.x_label(&outer, POSITION_LABEL);
    }
    if config.show_legend {
        canvas.legend(&outer, palette, breakpoints);
    }
    canvas.title(title);
    canvas.finish()
}

/// Folded self-identity plot; the y axis is left unlabeled
pub fn tri_scene(
    tri: &DiamondProjection,
    palette: &Palette,
    breakpoints: &Breakpoints,
    title: &str,
    config: &ExportConfig,
    size: (u32, u32),
) -> Scene {
    let mut canvas = Canvas::new(config, size.0, size.1);
    let y_max = if tri.y_max > 0.0 { tri.y_max } else { 1.0 };
    let area = PlotArea::with_margins(size.0, size.1, tri.x_range(), (0.0, y_max));

    if config.show_axes {
        canvas.x_axis(&area, format_mbp, true);
        canvas.x_label(&area, POSITION_LABEL);
    }

    for poly in tri.polygons() {
        // Vertices below the diagonal are flattened onto it
        let points = poly
            .iter()
            .map(|v| (area.to_px_x(v.x), area.to_px_y(v.y.max(0.0))))
            .collect();
        let class = poly.first().map(|v| v.color_class).unwrap_or(0);
        canvas.scene.push(Shape::Polygon {
            points,
            fill: palette.color(class).to_string(),
        });
    }

    if config.show_legend {
        canvas.legend(&area, palette, breakpoints);
    }
    canvas.title(title);
    canvas.finish()
}

/// Identity histogram restricted to the display window
pub fn hist_scene(
    hist: &Histogram,
    palette: &Palette,
    config: &ExportConfig,
    size: (u32, u32),
) -> Scene {
    let mut canvas = Canvas::new(config, size.0, size.1);
    let scaled = hist.scaled_counts();
    let divisor = if scaled { 1000.0 } else { 1.0 };
    let y_max = (hist.max_count() as f64 / divisor).max(1.0);

    let x_lo = hist.display_min.min(hist.display_max - 1.0);
    let area = PlotArea::with_margins(size.0, size.1, (x_lo, hist.display_max), (0.0, y_max));

    if config.show_axes {
        canvas.x_axis(&area, format_tick, true);
        canvas.x_label(&area, IDENTITY_LABEL);
        let label = if scaled {
            format!("{} (thousands)", COUNT_LABEL)
        } else {
            COUNT_LABEL.to_string()
        };
        canvas.y_axis(&area, format_tick, true);
        canvas.y_label(&area, &label);
    }

    for bin in hist.bins.iter().filter(|b| b.count > 0) {
        let start = bin.start.max(x_lo);
        let end = bin.end.min(hist.display_max);
        if start >= end {
            continue;
        }
        let (x0, x1) = (area.to_px_x(start), area.to_px_x(end));
        let y_top = area.to_px_y(bin.count as f64 / divisor);
        let fill = match bin.color_class {
            Some(class) => palette.color(class).to_string(),
            None => EMPTY_BIN_COLOR.to_string(),
        };
        canvas.scene.push(Shape::Rect {
            x: x0,
            y: y_top,
            width: (x1 - x0).max(0.5),
            height: area.bottom - y_top,
            fill,
        });
    }

    canvas.finish()
}
