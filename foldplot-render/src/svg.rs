use crate::scene::{Scene, Shape};
use crate::ExportConfig;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Accumulates SVG elements for one scene
pub struct SvgBuilder {
    width: u32,
    height: u32,
    font_family: String,
    elements: Vec<String>,
    top_comments: Vec<String>,
}

impl SvgBuilder {
    pub fn new(config: &ExportConfig, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            font_family: config.font_family.clone(),
            elements: Vec::new(),
            top_comments: Vec::new(),
        }
    }

    pub fn add_comment(&mut self, text: &str) {
        self.top_comments.push(text.replace("--", "- -"));
    }

    pub fn add_background(&mut self, color: &str) {
        self.elements.push(format!(
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            self.width,
            self.height,
            escape_xml(color)
        ));
    }

    pub fn add_shape(&mut self, shape: &Shape) {
        let element = match shape {
            Shape::Rect { x, y, width, height, fill } => format!(
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                x,
                y,
                width,
                height,
                escape_xml(fill)
            ),
            Shape::Polygon { points, fill } => {
                let pts: Vec<String> = points
                    .iter()
                    .map(|(x, y)| format!("{:.2},{:.2}", x, y))
                    .collect();
                format!(
                    r#"<polygon points="{}" fill="{}"/>"#,
                    pts.join(" "),
                    escape_xml(fill)
                )
            }
            Shape::Line { x1, y1, x2, y2, stroke, width } => format!(
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}"/>"#,
                x1,
                y1,
                x2,
                y2,
                escape_xml(stroke),
                width
            ),
            Shape::Text { x, y, text, size, anchor, vertical, bold } => {
                let transform = if *vertical {
                    format!(r#" transform="rotate(-90 {:.2} {:.2})""#, x, y)
                } else {
                    String::new()
                };
                let weight = if *bold { r#" font-weight="bold""# } else { "" };
                format!(
                    r#"<text x="{:.2}" y="{:.2}"{} font-family="{}" font-size="{:.1}px" text-anchor="{}"{}>{}</text>"#,
                    x,
                    y,
                    transform,
                    escape_xml(&self.font_family),
                    size,
                    anchor.as_svg(),
                    weight,
                    escape_xml(text)
                )
            }
        };
        self.elements.push(element);
    }

    pub fn add_scene(&mut self, scene: &Scene) {
        self.add_background(&scene.background);
        for shape in &scene.shapes {
            self.add_shape(shape);
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            self.width, self.height, self.width, self.height
        ));
        for c in &self.top_comments {
            for line in c.lines() {
                out.push_str(&format!("  <!-- {} -->\n", line));
            }
        }
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create SVG file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.render().as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn scene_builder(scene: &Scene, config: &ExportConfig) -> SvgBuilder {
    let mut svg = SvgBuilder::new(config, scene.width, scene.height);
    if let Some(comment) = &config.provenance_comment {
        svg.add_comment(comment);
    }
    svg.add_scene(scene);
    svg
}

/// A scene as a standalone SVG document
pub fn render_svg(scene: &Scene, config: &ExportConfig) -> String {
    scene_builder(scene, config).render()
}

/// Write a scene as a standalone SVG document
pub fn write_svg<P: AsRef<Path>>(scene: &Scene, config: &ExportConfig, path: P) -> Result<()> {
    scene_builder(scene, config).write_to_file(path)
}
