//! PDF output, one page per scene, behind the `pdf` feature.
//!
//! Scene pixels map to millimetres through the export dpi so the page has the
//! plot's physical size. PDF y runs bottom-up, so every y is flipped.

use crate::scene::Scene;
use crate::ExportConfig;
use anyhow::Result;
use std::path::Path;

#[cfg(feature = "pdf")]
mod backend {
    use crate::scene::{parse_hex_rgb, Scene, Shape, TextAnchor};
    use crate::ExportConfig;
    use anyhow::{anyhow, Context, Result};
    use printpdf::{PolygonMode as PaintMode, WindingOrder};
    use printpdf::{
        BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
        Polygon, Pt, Rgb, TextMatrix,
    };
    use std::fs::File;
    use std::io::BufWriter;
    use std::path::Path;

    /// Helvetica advance width as a fraction of the font size
    const AVG_GLYPH_WIDTH: f32 = 0.5;
    const PX_TO_PT: f32 = 0.75;

    struct PdfPage {
        layer: PdfLayerReference,
        regular: IndirectFontRef,
        bold: IndirectFontRef,
        mm_per_px: f32,
        height_px: f32,
    }

    impl PdfPage {
        fn x(&self, px: f32) -> Mm {
            Mm(px * self.mm_per_px)
        }

        fn y(&self, px: f32) -> Mm {
            Mm((self.height_px - px) * self.mm_per_px)
        }

        fn point(&self, x: f32, y: f32) -> (Point, bool) {
            (Point::new(self.x(x), self.y(y)), false)
        }

        fn fill(&self, color: &str) {
            let [r, g, b] = parse_hex_rgb(color).unwrap_or_else(|| {
                log::warn!("Unparsable color '{}', drawing in black", color);
                [0, 0, 0]
            });
            self.layer.set_fill_color(rgb(r, g, b));
        }

        fn polygon(&self, points: Vec<(Point, bool)>) {
            self.layer.add_polygon(Polygon {
                rings: vec![points],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }

        fn draw(&self, shape: &Shape) {
            match shape {
                Shape::Rect { x, y, width, height, fill } => {
                    self.fill(fill);
                    self.polygon(vec![
                        self.point(*x, *y),
                        self.point(x + width, *y),
                        self.point(x + width, y + height),
                        self.point(*x, y + height),
                    ]);
                }
                Shape::Polygon { points, fill } => {
                    self.fill(fill);
                    self.polygon(points.iter().map(|&(x, y)| self.point(x, y)).collect());
                }
                Shape::Line { x1, y1, x2, y2, stroke, width } => {
                    let [r, g, b] = parse_hex_rgb(stroke).unwrap_or([0, 0, 0]);
                    self.layer.set_outline_color(rgb(r, g, b));
                    self.layer.set_outline_thickness(width * PX_TO_PT);
                    self.layer.add_line(Line {
                        points: vec![self.point(*x1, *y1), self.point(*x2, *y2)],
                        is_closed: false,
                    });
                }
                Shape::Text { x, y, text, size, anchor, vertical, bold } => {
                    let font = if *bold { &self.bold } else { &self.regular };
                    let size_pt = size * PX_TO_PT;
                    let advance = text.chars().count() as f32 * size * AVG_GLYPH_WIDTH;
                    let shift = match anchor {
                        TextAnchor::Start => 0.0,
                        TextAnchor::Middle => advance / 2.0,
                        TextAnchor::End => advance,
                    };
                    self.layer.set_fill_color(rgb(0, 0, 0));
                    if *vertical {
                        self.layer.begin_text_section();
                        self.layer.set_font(font, size_pt);
                        self.layer.set_text_matrix(TextMatrix::TranslateRotate(
                            Pt::from(self.x(*x)),
                            Pt::from(self.y(y + shift)),
                            90.0,
                        ));
                        self.layer.write_text(text.clone(), font);
                        self.layer.end_text_section();
                    } else {
                        self.layer
                            .use_text(text.clone(), size_pt, self.x(x - shift), self.y(*y), font);
                    }
                }
            }
        }
    }

    fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::Rgb(Rgb::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            None,
        ))
    }

    pub fn write_pdf(scene: &Scene, config: &ExportConfig, path: &Path) -> Result<()> {
        let mm_per_px = 25.4 / config.dpi.max(1) as f32;
        let title = config.provenance_comment.as_deref().unwrap_or("foldplot");
        let (doc, page, layer) = PdfDocument::new(
            title,
            Mm(scene.width as f32 * mm_per_px),
            Mm(scene.height as f32 * mm_per_px),
            "Plot",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| anyhow!("Failed to load PDF font: {}", e))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| anyhow!("Failed to load PDF font: {}", e))?;
        let page = PdfPage {
            layer: doc.get_page(page).get_layer(layer),
            regular,
            bold,
            mm_per_px,
            height_px: scene.height as f32,
        };

        page.draw(&Shape::Rect {
            x: 0.0,
            y: 0.0,
            width: scene.width as f32,
            height: scene.height as f32,
            fill: scene.background.clone(),
        });
        for shape in &scene.shapes {
            page.draw(shape);
        }

        let file = File::create(path)
            .with_context(|| format!("Failed to create PDF file: {}", path.display()))?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| anyhow!("Failed to write PDF file {}: {}", path.display(), e))
    }
}

/// Write a scene as a single-page PDF
#[cfg(feature = "pdf")]
pub fn write_pdf<P: AsRef<Path>>(scene: &Scene, config: &ExportConfig, path: P) -> Result<()> {
    backend::write_pdf(scene, config, path.as_ref())
}

#[cfg(not(feature = "pdf"))]
pub fn write_pdf<P: AsRef<Path>>(_scene: &Scene, _config: &ExportConfig, _path: P) -> Result<()> {
    Err(anyhow::anyhow!("PDF export not enabled (compile with 'pdf' feature)"))
}
