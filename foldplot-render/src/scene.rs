//! Backend-neutral drawing primitives in canvas pixels (origin top-left)

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: String,
    },
    Polygon {
        points: Vec<(f32, f32)>,
        fill: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: String,
        width: f32,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        anchor: TextAnchor,
        /// Rotated -90 degrees around its anchor point
        vertical: bool,
        bold: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(width: u32, height: u32, background: &str) -> Self {
        Self {
            width,
            height,
            background: background.to_string(),
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn count<F: Fn(&Shape) -> bool>(&self, pred: F) -> usize {
        self.shapes.iter().filter(|s| pred(s)).count()
    }
}

/// Plot area inside a canvas and the data ranges mapped onto it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl PlotArea {
    /// Plot area with margins proportional to the canvas
    pub fn with_margins(width: u32, height: u32, x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        let (w, h) = (width as f32, height as f32);
        Self {
            left: (w * 0.12).max(40.0),
            right: w - (w * 0.04).max(10.0),
            top: (h * 0.08).max(20.0),
            bottom: h - (h * 0.12).max(36.0),
            x_range,
            y_range,
        }
    }

    pub fn to_px_x(&self, x: f64) -> f32 {
        let (lo, hi) = self.x_range;
        let t = if hi > lo { (x - lo) / (hi - lo) } else { 0.0 };
        self.left + t as f32 * (self.right - self.left)
    }

    /// Larger values are higher on the canvas
    pub fn to_px_y(&self, y: f64) -> f32 {
        let (lo, hi) = self.y_range;
        let t = if hi > lo { (y - lo) / (hi - lo) } else { 0.0 };
        self.bottom - t as f32 * (self.bottom - self.top)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Sub-area `(row, col)` of a `rows x cols` grid with `gap` pixels
    /// between neighbours; data ranges are shared with `self`
    pub fn cell(&self, row: usize, col: usize, rows: usize, cols: usize, gap: f32) -> Self {
        let (rows, cols) = (rows.max(1), cols.max(1));
        let w = (self.width() - gap * (cols - 1) as f32) / cols as f32;
        let h = (self.height() - gap * (rows - 1) as f32) / rows as f32;
        let left = self.left + col as f32 * (w + gap);
        let top = self.top + row as f32 * (h + gap);
        Self {
            left,
            right: left + w,
            top,
            bottom: top + h,
            ..*self
        }
    }
}

// Round a length to a "nice" number: 1, 2, or 5 × 10^k
pub fn nice_round_length(x: f64) -> f64 {
    if x <= 0.0 || !x.is_finite() {
        return 1.0;
    }
    let exp = x.log10().floor();
    let base = 10f64.powf(exp);
    let mant = x / base;
    let nice = if mant <= 1.0 {
        1.0
    } else if mant <= 2.0 {
        2.0
    } else if mant <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Round tick positions covering `[min, max]`
pub fn nice_ticks(min: f64, max: f64, desired: usize) -> Vec<f64> {
    let span = max - min;
    if !(span > 0.0) || desired == 0 {
        return vec![min];
    }
    let step = nice_round_length(span / desired as f64);
    let first = (min / step).ceil();
    let last = (max / step + 1e-9).floor();
    (first as i64..=last as i64).map(|k| k as f64 * step).collect()
}

/// Genomic position in Mbp without trailing zeros
pub fn format_mbp(bp: f64) -> String {
    format_tick(bp / 1e6)
}

pub fn format_tick(v: f64) -> String {
    let s = format!("{:.3}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Parse "#rrggbb" (or "#rgb") into RGB bytes
pub fn parse_hex_rgb(s: &str) -> Option<[u8; 3]> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }
    let channel = |h: &str| u8::from_str_radix(h, 16).ok();
    match hex.len() {
        6 => Some([channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?]),
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 17;
            }
            Some(rgb)
        }
        _ => None,
    }
}
