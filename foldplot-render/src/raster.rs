//! PNG output: the scene's SVG document rasterized with resvg, so labels and
//! axes match the vector output.

use crate::scene::Scene;
use crate::svg::render_svg;
use crate::ExportConfig;
use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use std::path::Path;

/// SVG rasterizer holding the font database used for text
pub struct Rasterizer {
    options: Options<'static>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// Rasterizer with the system fonts loaded
    pub fn new() -> Self {
        let mut options = Options::default();
        options.fontdb_mut().load_system_fonts();
        log::debug!("Loaded {} font face(s) for PNG text", options.fontdb.len());
        Self { options }
    }

    /// Whether any font is available to draw labels
    pub fn has_fonts(&self) -> bool {
        self.options.fontdb.len() > 0
    }

    pub fn render_svg(&self, svg: &str) -> Result<RgbaImage> {
        let tree = Tree::from_str(svg, &self.options).context("Failed to parse SVG for rasterization")?;
        let size = tree.size().to_int_size();
        let mut pixmap = Pixmap::new(size.width(), size.height())
            .with_context(|| format!("Invalid raster size {}x{}", size.width(), size.height()))?;
        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());

        let mut img = RgbaImage::new(size.width(), size.height());
        for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Ok(img)
    }

    pub fn rasterize(&self, scene: &Scene, config: &ExportConfig) -> Result<RgbaImage> {
        self.render_svg(&render_svg(scene, config))
    }

    pub fn write_png<P: AsRef<Path>>(&self, scene: &Scene, config: &ExportConfig, path: P) -> Result<()> {
        let path = path.as_ref();
        self.rasterize(scene, config)?
            .save(path)
            .with_context(|| format!("Failed to write PNG file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Shape, TextAnchor};

    const RED: &str = "#ff0000";
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_rect_fill_clips_to_canvas() {
        let mut scene = Scene::new(10, 10, "#ffffff");
        scene.push(Shape::Rect {
            x: -5.0,
            y: 5.0,
            width: 8.0,
            height: 20.0,
            fill: RED.into(),
        });
        let img = Rasterizer::new().rasterize(&scene, &ExportConfig::default()).unwrap();
        assert_eq!((img.width(), img.height()), (10, 10));
        assert_eq!(img.get_pixel(0, 9), &Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(1, 6), &Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(5, 6), &WHITE);
        assert_eq!(img.get_pixel(0, 3), &WHITE);
    }

    #[test]
    fn test_diamond_fill() {
        let mut scene = Scene::new(21, 21, "#ffffff");
        scene.push(Shape::Polygon {
            points: vec![(20.0, 10.0), (10.0, 0.0), (0.0, 10.0), (10.0, 20.0)],
            fill: RED.into(),
        });
        let img = Rasterizer::new().rasterize(&scene, &ExportConfig::default()).unwrap();
        assert_eq!(img.get_pixel(10, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(img.get_pixel(0, 0), &WHITE);
        assert_eq!(img.get_pixel(20, 20), &WHITE);
    }

    #[test]
    fn test_labels_are_drawn() {
        let rasterizer = Rasterizer::new();
        let mut scene = Scene::new(200, 40, "#ffffff");
        scene.push(Shape::Text {
            x: 100.0,
            y: 28.0,
            text: "Genomic Position".into(),
            size: 20.0,
            anchor: TextAnchor::Middle,
            vertical: false,
            bold: false,
        });
        let img = rasterizer.rasterize(&scene, &ExportConfig::default()).unwrap();
        if rasterizer.has_fonts() {
            assert!(img.pixels().any(|p| *p != WHITE));
        }
    }

    #[test]
    fn test_invalid_size_is_an_error() {
        let scene = Scene::new(0, 0, "#ffffff");
        assert!(Rasterizer::new().rasterize(&scene, &ExportConfig::default()).is_err());
    }
}
