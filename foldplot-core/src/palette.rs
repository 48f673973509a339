//! Color palettes
//!
//! Palette names follow the ColorBrewer `Family_N` convention
//! (`Spectral_11`, `Blues_7`, `Set1_5`). Each family is served by a
//! [`PaletteResolver`] registered once in a [`PaletteRegistry`]; the pipeline
//! resolves its palette a single time before classification and afterwards
//! only indexes into the resulting color list.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One ColorBrewer scheme, low to high
pub type Scheme = &'static [&'static str];
/// Schemes of a family indexed by `N - 3`
pub type SchemeTable = &'static [Scheme];

pub const DEFAULT_PALETTE: &str = "Spectral_11";
const FALLBACK_FAMILY: &str = "Spectral";
/// Smallest scheme ColorBrewer publishes for any family
pub const MIN_SCHEME_COLORS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteFamily {
    Sequential,
    Diverging,
    Qualitative,
}

impl fmt::Display for PaletteFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteFamily::Sequential => write!(f, "sequential"),
            PaletteFamily::Diverging => write!(f, "diverging"),
            PaletteFamily::Qualitative => write!(f, "qualitative"),
        }
    }
}

/// Direction in which palette colors are assigned to ascending classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Orientation {
    #[default]
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reversed,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reversed,
            Orientation::Reversed => Orientation::Forward,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Forward => write!(f, "+"),
            Orientation::Reversed => write!(f, "-"),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" | "forward" => Ok(Orientation::Forward),
            "-" | "reversed" | "reverse" => Ok(Orientation::Reversed),
            other => Err(format!("invalid palette orientation '{}', expected '+' or '-'", other)),
        }
    }
}

/// Ordered color identifiers; class `i` is drawn with `colors[i]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    /// Family of a named palette; `None` for caller-supplied colors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<PaletteFamily>,
    pub colors: Vec<String>,
}

impl Palette {
    pub fn new<S: Into<String>>(name: S, colors: Vec<String>) -> Self {
        Self {
            name: name.into(),
            family: None,
            colors,
        }
    }

    /// A caller-supplied color list, used as given
    pub fn custom(colors: Vec<String>) -> Self {
        Self::new("custom", colors)
    }

    pub fn with_family(mut self, family: PaletteFamily) -> Self {
        self.family = Some(family);
        self
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for a class; out-of-range classes get the last color
    pub fn color(&self, class: usize) -> &str {
        self.colors
            .get(class)
            .or_else(|| self.colors.last())
            .map(String::as_str)
            .unwrap_or("#000000")
    }

    fn oriented(mut self, orientation: Orientation) -> Self {
        if orientation == Orientation::Reversed {
            self.colors.reverse();
        }
        self
    }
}

/// Palette request as received from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteSpec {
    pub name: String,
    pub orientation: Orientation,
    /// Explicit colors replace the named palette entirely
    pub custom_colors: Option<Vec<String>>,
}

impl Default for PaletteSpec {
    fn default() -> Self {
        Self {
            name: DEFAULT_PALETTE.to_string(),
            orientation: Orientation::Forward,
            custom_colors: None,
        }
    }
}

/// A family of palettes that can produce an ordered color list
pub trait PaletteResolver: Send + Sync {
    fn name(&self) -> &str;

    fn family(&self) -> PaletteFamily;

    fn max_colors(&self) -> usize;

    /// The published scheme with exactly `count` colors
    fn scheme(&self, count: usize) -> Option<Scheme>;

    /// Orientation actually applied for a requested one
    fn effective_orientation(&self, requested: Orientation) -> Orientation {
        requested
    }

    fn resolve(&self, orientation: Orientation, count: usize) -> Option<Palette> {
        let colors = self.scheme(count)?.iter().map(|c| c.to_string()).collect();
        let name = format!("{}_{}", self.name(), count);
        Some(
            Palette::new(name, colors)
                .with_family(self.family())
                .oriented(self.effective_orientation(orientation)),
        )
    }
}

fn scheme_for(schemes: SchemeTable, count: usize) -> Option<Scheme> {
    count
        .checked_sub(MIN_SCHEME_COLORS)
        .and_then(|i| schemes.get(i))
        .copied()
}

pub struct SequentialPalette {
    name: &'static str,
    schemes: SchemeTable,
}

impl PaletteResolver for SequentialPalette {
    fn name(&self) -> &str {
        self.name
    }

    fn family(&self) -> PaletteFamily {
        PaletteFamily::Sequential
    }

    fn max_colors(&self) -> usize {
        self.schemes.len() + MIN_SCHEME_COLORS - 1
    }

    fn scheme(&self, count: usize) -> Option<Scheme> {
        scheme_for(self.schemes, count)
    }
}

/// Diverging schemes run warm-to-cool; they are flipped so that high
/// identity lands on the warm end by default.
pub struct DivergingPalette {
    name: &'static str,
    schemes: SchemeTable,
}

impl PaletteResolver for DivergingPalette {
    fn name(&self) -> &str {
        self.name
    }

    fn family(&self) -> PaletteFamily {
        PaletteFamily::Diverging
    }

    fn max_colors(&self) -> usize {
        self.schemes.len() + MIN_SCHEME_COLORS - 1
    }

    fn scheme(&self, count: usize) -> Option<Scheme> {
        scheme_for(self.schemes, count)
    }

    fn effective_orientation(&self, requested: Orientation) -> Orientation {
        requested.flipped()
    }
}

/// Smaller qualitative schemes are prefixes of the widest one.
pub struct QualitativePalette {
    name: &'static str,
    colors: Scheme,
}

impl PaletteResolver for QualitativePalette {
    fn name(&self) -> &str {
        self.name
    }

    fn family(&self) -> PaletteFamily {
        PaletteFamily::Qualitative
    }

    fn max_colors(&self) -> usize {
        self.colors.len()
    }

    fn scheme(&self, count: usize) -> Option<Scheme> {
        if count < MIN_SCHEME_COLORS {
            return None;
        }
        self.colors.get(..count)
    }
}

/// Palette families keyed by family name
pub struct PaletteRegistry {
    resolvers: HashMap<String, Box<dyn PaletteResolver>>,
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PaletteRegistry {
    pub fn empty() -> Self {
        Self {
            resolvers: HashMap::new(),
        }
    }

    /// Registry with the bundled ColorBrewer families
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for &(name, schemes) in DIVERGING {
            registry.register(Box::new(DivergingPalette { name, schemes }));
        }
        for &(name, schemes) in SEQUENTIAL {
            registry.register(Box::new(SequentialPalette { name, schemes }));
        }
        for &(name, colors) in QUALITATIVE {
            registry.register(Box::new(QualitativePalette { name, colors }));
        }
        registry
    }

    pub fn register(&mut self, resolver: Box<dyn PaletteResolver>) {
        self.resolvers
            .insert(resolver.name().to_string(), resolver);
    }

    /// Every `Family_N` name the registry can resolve, grouped by family kind
    pub fn names(&self) -> Vec<(PaletteFamily, String)> {
        let mut names: Vec<(PaletteFamily, String)> = self
            .resolvers
            .values()
            .flat_map(|r| {
                (MIN_SCHEME_COLORS..=r.max_colors())
                    .filter(|&n| r.scheme(n).is_some())
                    .map(move |n| (r.family(), format!("{}_{}", r.name(), n)))
            })
            .collect();
        names.sort_by(|a, b| {
            family_rank(a.0)
                .cmp(&family_rank(b.0))
                .then_with(|| a.1.cmp(&b.1))
        });
        names
    }

    /// Family of a `Family_N` or bare family name
    pub fn family(&self, name: &str) -> Option<PaletteFamily> {
        let family = name.rsplit_once('_').map_or(name, |(family, _)| family);
        self.resolvers.get(family).map(|r| r.family())
    }

    /// Resolve `Family_N` (or a bare family name for its widest scheme)
    pub fn lookup(&self, name: &str, orientation: Orientation) -> Option<Palette> {
        let (family, count) = match name.rsplit_once('_') {
            Some((family, n)) => (family, n.parse::<usize>().ok()?),
            None => (name, 0),
        };
        let resolver = self.resolvers.get(family)?;
        let count = if count == 0 { resolver.max_colors() } else { count };
        resolver.resolve(orientation, count)
    }

    /// Resolve a palette request, falling back to reversed Spectral for unknown names
    pub fn select(&self, spec: &PaletteSpec) -> Palette {
        if let Some(colors) = &spec.custom_colors {
            return Palette::custom(colors.clone());
        }
        if let Some(palette) = self.lookup(&spec.name, spec.orientation) {
            return palette;
        }

        log::warn!(
            "Unknown palette '{}', using {} reversed",
            spec.name,
            DEFAULT_PALETTE
        );
        let scheme = self
            .resolvers
            .get(FALLBACK_FAMILY)
            .and_then(|resolver| resolver.scheme(resolver.max_colors()))
            .unwrap_or(SPECTRAL[SPECTRAL.len() - 1]);
        let colors = scheme.iter().map(|c| c.to_string()).collect();
        Palette::new(DEFAULT_PALETTE, colors)
            .with_family(PaletteFamily::Diverging)
            .oriented(Orientation::Reversed)
    }
}

fn family_rank(family: PaletteFamily) -> u8 {
    match family {
        PaletteFamily::Diverging => 0,
        PaletteFamily::Sequential => 1,
        PaletteFamily::Qualitative => 2,
    }
}

const YL_GN: SchemeTable = &[
    &["#f7fcb9", "#addd8e", "#31a354"],
    &["#ffffcc", "#c2e699", "#78c679", "#238443"],
    &["#ffffcc", "#c2e699", "#78c679", "#31a354", "#006837"],
    &["#ffffcc", "#d9f0a3", "#addd8e", "#78c679", "#31a354", "#006837"],
    &["#ffffcc", "#d9f0a3", "#addd8e", "#78c679", "#41ab5d", "#238443", "#005a32"],
    &["#ffffe5", "#f7fcb9", "#d9f0a3", "#addd8e", "#78c679", "#41ab5d", "#238443", "#005a32"],
    &[
        "#ffffe5", "#f7fcb9", "#d9f0a3", "#addd8e", "#78c679", "#41ab5d", "#238443", "#006837",
        "#004529",
    ],
];

const YL_GN_BU: SchemeTable = &[
    &["#edf8b1", "#7fcdbb", "#2c7fb8"],
    &["#ffffcc", "#a1dab4", "#41b6c4", "#225ea8"],
    &["#ffffcc", "#a1dab4", "#41b6c4", "#2c7fb8", "#253494"],
    &["#ffffcc", "#c7e9b4", "#7fcdbb", "#41b6c4", "#2c7fb8", "#253494"],
    &["#ffffcc", "#c7e9b4", "#7fcdbb", "#41b6c4", "#1d91c0", "#225ea8", "#0c2c84"],
    &["#ffffd9", "#edf8b1", "#c7e9b4", "#7fcdbb", "#41b6c4", "#1d91c0", "#225ea8", "#0c2c84"],
    &[
        "#ffffd9", "#edf8b1", "#c7e9b4", "#7fcdbb", "#41b6c4", "#1d91c0", "#225ea8", "#253494",
        "#081d58",
    ],
];

const GN_BU: SchemeTable = &[
    &["#e0f3db", "#a8ddb5", "#43a2ca"],
    &["#f0f9e8", "#bae4bc", "#7bccc4", "#2b8cbe"],
    &["#f0f9e8", "#bae4bc", "#7bccc4", "#43a2ca", "#0868ac"],
    &["#f0f9e8", "#ccebc5", "#a8ddb5", "#7bccc4", "#43a2ca", "#0868ac"],
    &["#f0f9e8", "#ccebc5", "#a8ddb5", "#7bccc4", "#4eb3d3", "#2b8cbe", "#08589e"],
    &["#f7fcf0", "#e0f3db", "#ccebc5", "#a8ddb5", "#7bccc4", "#4eb3d3", "#2b8cbe", "#08589e"],
    &[
        "#f7fcf0", "#e0f3db", "#ccebc5", "#a8ddb5", "#7bccc4", "#4eb3d3", "#2b8cbe", "#0868ac",
        "#084081",
    ],
];

const BU_GN: SchemeTable = &[
    &["#e5f5f9", "#99d8c9", "#2ca25f"],
    &["#edf8fb", "#b2e2e2", "#66c2a4", "#238b45"],
    &["#edf8fb", "#b2e2e2", "#66c2a4", "#2ca25f", "#006d2c"],
    &["#edf8fb", "#ccece6", "#99d8c9", "#66c2a4", "#2ca25f", "#006d2c"],
    &["#edf8fb", "#ccece6", "#99d8c9", "#66c2a4", "#41ae76", "#238b45", "#005824"],
    &["#f7fcfd", "#e5f5f9", "#ccece6", "#99d8c9", "#66c2a4", "#41ae76", "#238b45", "#005824"],
    &[
        "#f7fcfd", "#e5f5f9", "#ccece6", "#99d8c9", "#66c2a4", "#41ae76", "#238b45", "#006d2c",
        "#00441b",
    ],
];

const PU_BU_GN: SchemeTable = &[
    &["#ece2f0", "#a6bddb", "#1c9099"],
    &["#f6eff7", "#bdc9e1", "#67a9cf", "#02818a"],
    &["#f6eff7", "#bdc9e1", "#67a9cf", "#1c9099", "#016c59"],
    &["#f6eff7", "#d0d1e6", "#a6bddb", "#67a9cf", "#1c9099", "#016c59"],
    &["#f6eff7", "#d0d1e6", "#a6bddb", "#67a9cf", "#3690c0", "#02818a", "#016450"],
    &["#fff7fb", "#ece2f0", "#d0d1e6", "#a6bddb", "#67a9cf", "#3690c0", "#02818a", "#016450"],
    &[
        "#fff7fb", "#ece2f0", "#d0d1e6", "#a6bddb", "#67a9cf", "#3690c0", "#02818a", "#016c59",
        "#014636",
    ],
];

const PU_BU: SchemeTable = &[
    &["#ece7f2", "#a6bddb", "#2b8cbe"],
    &["#f1eef6", "#bdc9e1", "#74a9cf", "#0570b0"],
    &["#f1eef6", "#bdc9e1", "#74a9cf", "#2b8cbe", "#045a8d"],
    &["#f1eef6", "#d0d1e6", "#a6bddb", "#74a9cf", "#2b8cbe", "#045a8d"],
    &["#f1eef6", "#d0d1e6", "#a6bddb", "#74a9cf", "#3690c0", "#0570b0", "#034e7b"],
    &["#fff7fb", "#ece7f2", "#d0d1e6", "#a6bddb", "#74a9cf", "#3690c0", "#0570b0", "#034e7b"],
    &[
        "#fff7fb", "#ece7f2", "#d0d1e6", "#a6bddb", "#74a9cf", "#3690c0", "#0570b0", "#045a8d",
        "#023858",
    ],
];

const BU_PU: SchemeTable = &[
    &["#e0ecf4", "#9ebcda", "#8856a7"],
    &["#edf8fb", "#b3cde3", "#8c96c6", "#88419d"],
    &["#edf8fb", "#b3cde3", "#8c96c6", "#8856a7", "#810f7c"],
    &["#edf8fb", "#bfd3e6", "#9ebcda", "#8c96c6", "#8856a7", "#810f7c"],
    &["#edf8fb", "#bfd3e6", "#9ebcda", "#8c96c6", "#8c6bb1", "#88419d", "#6e016b"],
    &["#f7fcfd", "#e0ecf4", "#bfd3e6", "#9ebcda", "#8c96c6", "#8c6bb1", "#88419d", "#6e016b"],
    &[
        "#f7fcfd", "#e0ecf4", "#bfd3e6", "#9ebcda", "#8c96c6", "#8c6bb1", "#88419d", "#810f7c",
        "#4d004b",
    ],
];

const RD_PU: SchemeTable = &[
    &["#fde0dd", "#fa9fb5", "#c51b8a"],
    &["#feebe2", "#fbb4b9", "#f768a1", "#ae017e"],
    &["#feebe2", "#fbb4b9", "#f768a1", "#c51b8a", "#7a0177"],
    &["#feebe2", "#fcc5c0", "#fa9fb5", "#f768a1", "#c51b8a", "#7a0177"],
    &["#feebe2", "#fcc5c0", "#fa9fb5", "#f768a1", "#dd3497", "#ae017e", "#7a0177"],
    &["#fff7f3", "#fde0dd", "#fcc5c0", "#fa9fb5", "#f768a1", "#dd3497", "#ae017e", "#7a0177"],
    &[
        "#fff7f3", "#fde0dd", "#fcc5c0", "#fa9fb5", "#f768a1", "#dd3497", "#ae017e", "#7a0177",
        "#49006a",
    ],
];

const PU_RD: SchemeTable = &[
    &["#e7e1ef", "#c994c7", "#dd1c77"],
    &["#f1eef6", "#d7b5d8", "#df65b0", "#ce1256"],
    &["#f1eef6", "#d7b5d8", "#df65b0", "#dd1c77", "#980043"],
    &["#f1eef6", "#d4b9da", "#c994c7", "#df65b0", "#dd1c77", "#980043"],
    &["#f1eef6", "#d4b9da", "#c994c7", "#df65b0", "#e7298a", "#ce1256", "#91003f"],
    &["#f7f4f9", "#e7e1ef", "#d4b9da", "#c994c7", "#df65b0", "#e7298a", "#ce1256", "#91003f"],
    &[
        "#f7f4f9", "#e7e1ef", "#d4b9da", "#c994c7", "#df65b0", "#e7298a", "#ce1256", "#980043",
        "#67001f",
    ],
];

const OR_RD: SchemeTable = &[
    &["#fee8c8", "#fdbb84", "#e34a33"],
    &["#fef0d9", "#fdcc8a", "#fc8d59", "#d7301f"],
    &["#fef0d9", "#fdcc8a", "#fc8d59", "#e34a33", "#b30000"],
    &["#fef0d9", "#fdd49e", "#fdbb84", "#fc8d59", "#e34a33", "#b30000"],
    &["#fef0d9", "#fdd49e", "#fdbb84", "#fc8d59", "#ef6548", "#d7301f", "#990000"],
    &["#fff7ec", "#fee8c8", "#fdd49e", "#fdbb84", "#fc8d59", "#ef6548", "#d7301f", "#990000"],
    &[
        "#fff7ec", "#fee8c8", "#fdd49e", "#fdbb84", "#fc8d59", "#ef6548", "#d7301f", "#b30000",
        "#7f0000",
    ],
];

const YL_OR_RD: SchemeTable = &[
    &["#ffeda0", "#feb24c", "#f03b20"],
    &["#ffffb2", "#fecc5c", "#fd8d3c", "#e31a1c"],
    &["#ffffb2", "#fecc5c", "#fd8d3c", "#f03b20", "#bd0026"],
    &["#ffffb2", "#fed976", "#feb24c", "#fd8d3c", "#f03b20", "#bd0026"],
    &["#ffffb2", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#b10026"],
    &["#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#b10026"],
    &[
        "#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#bd0026",
        "#800026",
    ],
];

const YL_OR_BR: SchemeTable = &[
    &["#fff7bc", "#fec44f", "#d95f0e"],
    &["#ffffd4", "#fed98e", "#fe9929", "#cc4c02"],
    &["#ffffd4", "#fed98e", "#fe9929", "#d95f0e", "#993404"],
    &["#ffffd4", "#fee391", "#fec44f", "#fe9929", "#d95f0e", "#993404"],
    &["#ffffd4", "#fee391", "#fec44f", "#fe9929", "#ec7014", "#cc4c02", "#8c2d04"],
    &["#ffffe5", "#fff7bc", "#fee391", "#fec44f", "#fe9929", "#ec7014", "#cc4c02", "#8c2d04"],
    &[
        "#ffffe5", "#fff7bc", "#fee391", "#fec44f", "#fe9929", "#ec7014", "#cc4c02", "#993404",
        "#662506",
    ],
];

const PURPLES: SchemeTable = &[
    &["#efedf5", "#bcbddc", "#756bb1"],
    &["#f2f0f7", "#cbc9e2", "#9e9ac8", "#6a51a3"],
    &["#f2f0f7", "#cbc9e2", "#9e9ac8", "#756bb1", "#54278f"],
    &["#f2f0f7", "#dadaeb", "#bcbddc", "#9e9ac8", "#756bb1", "#54278f"],
    &["#f2f0f7", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#4a1486"],
    &["#fcfbfd", "#efedf5", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#4a1486"],
    &[
        "#fcfbfd", "#efedf5", "#dadaeb", "#bcbddc", "#9e9ac8", "#807dba", "#6a51a3", "#54278f",
        "#3f007d",
    ],
];

const BLUES: SchemeTable = &[
    &["#deebf7", "#9ecae1", "#3182bd"],
    &["#eff3ff", "#bdd7e7", "#6baed6", "#2171b5"],
    &["#eff3ff", "#bdd7e7", "#6baed6", "#3182bd", "#08519c"],
    &["#eff3ff", "#c6dbef", "#9ecae1", "#6baed6", "#3182bd", "#08519c"],
    &["#eff3ff", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#084594"],
    &["#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#084594"],
    &[
        "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
        "#08306b",
    ],
];

const GREENS: SchemeTable = &[
    &["#e5f5e0", "#a1d99b", "#31a354"],
    &["#edf8e9", "#bae4b3", "#74c476", "#238b45"],
    &["#edf8e9", "#bae4b3", "#74c476", "#31a354", "#006d2c"],
    &["#edf8e9", "#c7e9c0", "#a1d99b", "#74c476", "#31a354", "#006d2c"],
    &["#edf8e9", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#005a32"],
    &["#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#005a32"],
    &[
        "#f7fcf5", "#e5f5e0", "#c7e9c0", "#a1d99b", "#74c476", "#41ab5d", "#238b45", "#006d2c",
        "#00441b",
    ],
];

const ORANGES: SchemeTable = &[
    &["#fee6ce", "#fdae6b", "#e6550d"],
    &["#feedde", "#fdbe85", "#fd8d3c", "#d94701"],
    &["#feedde", "#fdbe85", "#fd8d3c", "#e6550d", "#a63603"],
    &["#feedde", "#fdd0a2", "#fdae6b", "#fd8d3c", "#e6550d", "#a63603"],
    &["#feedde", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#8c2d04"],
    &["#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#8c2d04"],
    &[
        "#fff5eb", "#fee6ce", "#fdd0a2", "#fdae6b", "#fd8d3c", "#f16913", "#d94801", "#a63603",
        "#7f2704",
    ],
];

const REDS: SchemeTable = &[
    &["#fee0d2", "#fc9272", "#de2d26"],
    &["#fee5d9", "#fcae91", "#fb6a4a", "#cb181d"],
    &["#fee5d9", "#fcae91", "#fb6a4a", "#de2d26", "#a50f15"],
    &["#fee5d9", "#fcbba1", "#fc9272", "#fb6a4a", "#de2d26", "#a50f15"],
    &["#fee5d9", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#99000d"],
    &["#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#99000d"],
    &[
        "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15",
        "#67000d",
    ],
];

const GREYS: SchemeTable = &[
    &["#f0f0f0", "#bdbdbd", "#636363"],
    &["#f7f7f7", "#cccccc", "#969696", "#525252"],
    &["#f7f7f7", "#cccccc", "#969696", "#636363", "#252525"],
    &["#f7f7f7", "#d9d9d9", "#bdbdbd", "#969696", "#636363", "#252525"],
    &["#f7f7f7", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252", "#252525"],
    &["#ffffff", "#f0f0f0", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252", "#252525"],
    &[
        "#ffffff", "#f0f0f0", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252", "#252525",
        "#000000",
    ],
];

const BRBG: SchemeTable = &[
    &["#d8b365", "#f5f5f5", "#5ab4ac"],
    &["#a6611a", "#dfc27d", "#80cdc1", "#018571"],
    &["#a6611a", "#dfc27d", "#f5f5f5", "#80cdc1", "#018571"],
    &["#8c510a", "#d8b365", "#f6e8c3", "#c7eae5", "#5ab4ac", "#01665e"],
    &["#8c510a", "#d8b365", "#f6e8c3", "#f5f5f5", "#c7eae5", "#5ab4ac", "#01665e"],
    &["#8c510a", "#bf812d", "#dfc27d", "#f6e8c3", "#c7eae5", "#80cdc1", "#35978f", "#01665e"],
    &[
        "#8c510a", "#bf812d", "#dfc27d", "#f6e8c3", "#f5f5f5", "#c7eae5", "#80cdc1", "#35978f",
        "#01665e",
    ],
    &[
        "#543005", "#8c510a", "#bf812d", "#dfc27d", "#f6e8c3", "#c7eae5", "#80cdc1", "#35978f",
        "#01665e", "#003c30",
    ],
    &[
        "#543005", "#8c510a", "#bf812d", "#dfc27d", "#f6e8c3", "#f5f5f5", "#c7eae5", "#80cdc1",
        "#35978f", "#01665e", "#003c30",
    ],
];

const PIYG: SchemeTable = &[
    &["#e9a3c9", "#f7f7f7", "#a1d76a"],
    &["#d01c8b", "#f1b6da", "#b8e186", "#4dac26"],
    &["#d01c8b", "#f1b6da", "#f7f7f7", "#b8e186", "#4dac26"],
    &["#c51b7d", "#e9a3c9", "#fde0ef", "#e6f5d0", "#a1d76a", "#4d9221"],
    &["#c51b7d", "#e9a3c9", "#fde0ef", "#f7f7f7", "#e6f5d0", "#a1d76a", "#4d9221"],
    &["#c51b7d", "#de77ae", "#f1b6da", "#fde0ef", "#e6f5d0", "#b8e186", "#7fbc41", "#4d9221"],
    &[
        "#c51b7d", "#de77ae", "#f1b6da", "#fde0ef", "#f7f7f7", "#e6f5d0", "#b8e186", "#7fbc41",
        "#4d9221",
    ],
    &[
        "#8e0152", "#c51b7d", "#de77ae", "#f1b6da", "#fde0ef", "#e6f5d0", "#b8e186", "#7fbc41",
        "#4d9221", "#276419",
    ],
    &[
        "#8e0152", "#c51b7d", "#de77ae", "#f1b6da", "#fde0ef", "#f7f7f7", "#e6f5d0", "#b8e186",
        "#7fbc41", "#4d9221", "#276419",
    ],
];

const PRGN: SchemeTable = &[
    &["#af8dc3", "#f7f7f7", "#7fbf7b"],
    &["#7b3294", "#c2a5cf", "#a6dba0", "#008837"],
    &["#7b3294", "#c2a5cf", "#f7f7f7", "#a6dba0", "#008837"],
    &["#762a83", "#af8dc3", "#e7d4e8", "#d9f0d3", "#7fbf7b", "#1b7837"],
    &["#762a83", "#af8dc3", "#e7d4e8", "#f7f7f7", "#d9f0d3", "#7fbf7b", "#1b7837"],
    &["#762a83", "#9970ab", "#c2a5cf", "#e7d4e8", "#d9f0d3", "#a6dba0", "#5aae61", "#1b7837"],
    &[
        "#762a83", "#9970ab", "#c2a5cf", "#e7d4e8", "#f7f7f7", "#d9f0d3", "#a6dba0", "#5aae61",
        "#1b7837",
    ],
    &[
        "#40004b", "#762a83", "#9970ab", "#c2a5cf", "#e7d4e8", "#d9f0d3", "#a6dba0", "#5aae61",
        "#1b7837", "#00441b",
    ],
    &[
        "#40004b", "#762a83", "#9970ab", "#c2a5cf", "#e7d4e8", "#f7f7f7", "#d9f0d3", "#a6dba0",
        "#5aae61", "#1b7837", "#00441b",
    ],
];

const PU_OR: SchemeTable = &[
    &["#f1a340", "#f7f7f7", "#998ec3"],
    &["#e66101", "#fdb863", "#b2abd2", "#5e3c99"],
    &["#e66101", "#fdb863", "#f7f7f7", "#b2abd2", "#5e3c99"],
    &["#b35806", "#f1a340", "#fee0b6", "#d8daeb", "#998ec3", "#542788"],
    &["#b35806", "#f1a340", "#fee0b6", "#f7f7f7", "#d8daeb", "#998ec3", "#542788"],
    &["#b35806", "#e08214", "#fdb863", "#fee0b6", "#d8daeb", "#b2abd2", "#8073ac", "#542788"],
    &[
        "#b35806", "#e08214", "#fdb863", "#fee0b6", "#f7f7f7", "#d8daeb", "#b2abd2", "#8073ac",
        "#542788",
    ],
    &[
        "#7f3b08", "#b35806", "#e08214", "#fdb863", "#fee0b6", "#d8daeb", "#b2abd2", "#8073ac",
        "#542788", "#2d004b",
    ],
    &[
        "#7f3b08", "#b35806", "#e08214", "#fdb863", "#fee0b6", "#f7f7f7", "#d8daeb", "#b2abd2",
        "#8073ac", "#542788", "#2d004b",
    ],
];

const RD_BU: SchemeTable = &[
    &["#ef8a62", "#f7f7f7", "#67a9cf"],
    &["#ca0020", "#f4a582", "#92c5de", "#0571b0"],
    &["#ca0020", "#f4a582", "#f7f7f7", "#92c5de", "#0571b0"],
    &["#b2182b", "#ef8a62", "#fddbc7", "#d1e5f0", "#67a9cf", "#2166ac"],
    &["#b2182b", "#ef8a62", "#fddbc7", "#f7f7f7", "#d1e5f0", "#67a9cf", "#2166ac"],
    &["#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#d1e5f0", "#92c5de", "#4393c3", "#2166ac"],
    &[
        "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0", "#92c5de", "#4393c3",
        "#2166ac",
    ],
    &[
        "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#d1e5f0", "#92c5de", "#4393c3",
        "#2166ac", "#053061",
    ],
    &[
        "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0", "#92c5de",
        "#4393c3", "#2166ac", "#053061",
    ],
];

const RD_GY: SchemeTable = &[
    &["#ef8a62", "#ffffff", "#999999"],
    &["#ca0020", "#f4a582", "#bababa", "#404040"],
    &["#ca0020", "#f4a582", "#ffffff", "#bababa", "#404040"],
    &["#b2182b", "#ef8a62", "#fddbc7", "#e0e0e0", "#999999", "#4d4d4d"],
    &["#b2182b", "#ef8a62", "#fddbc7", "#ffffff", "#e0e0e0", "#999999", "#4d4d4d"],
    &["#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#e0e0e0", "#bababa", "#878787", "#4d4d4d"],
    &[
        "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#ffffff", "#e0e0e0", "#bababa", "#878787",
        "#4d4d4d",
    ],
    &[
        "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#e0e0e0", "#bababa", "#878787",
        "#4d4d4d", "#1a1a1a",
    ],
    &[
        "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#ffffff", "#e0e0e0", "#bababa",
        "#878787", "#4d4d4d", "#1a1a1a",
    ],
];

const RD_YL_BU: SchemeTable = &[
    &["#fc8d59", "#ffffbf", "#91bfdb"],
    &["#d7191c", "#fdae61", "#abd9e9", "#2c7bb6"],
    &["#d7191c", "#fdae61", "#ffffbf", "#abd9e9", "#2c7bb6"],
    &["#d73027", "#fc8d59", "#fee090", "#e0f3f8", "#91bfdb", "#4575b4"],
    &["#d73027", "#fc8d59", "#fee090", "#ffffbf", "#e0f3f8", "#91bfdb", "#4575b4"],
    &["#d73027", "#f46d43", "#fdae61", "#fee090", "#e0f3f8", "#abd9e9", "#74add1", "#4575b4"],
    &[
        "#d73027", "#f46d43", "#fdae61", "#fee090", "#ffffbf", "#e0f3f8", "#abd9e9", "#74add1",
        "#4575b4",
    ],
    &[
        "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090", "#e0f3f8", "#abd9e9", "#74add1",
        "#4575b4", "#313695",
    ],
    &[
        "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090", "#ffffbf", "#e0f3f8", "#abd9e9",
        "#74add1", "#4575b4", "#313695",
    ],
];

const RD_YL_GN: SchemeTable = &[
    &["#fc8d59", "#ffffbf", "#91cf60"],
    &["#d7191c", "#fdae61", "#a6d96a", "#1a9641"],
    &["#d7191c", "#fdae61", "#ffffbf", "#a6d96a", "#1a9641"],
    &["#d73027", "#fc8d59", "#fee08b", "#d9ef8b", "#91cf60", "#1a9850"],
    &["#d73027", "#fc8d59", "#fee08b", "#ffffbf", "#d9ef8b", "#91cf60", "#1a9850"],
    &["#d73027", "#f46d43", "#fdae61", "#fee08b", "#d9ef8b", "#a6d96a", "#66bd63", "#1a9850"],
    &[
        "#d73027", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#d9ef8b", "#a6d96a", "#66bd63",
        "#1a9850",
    ],
    &[
        "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee08b", "#d9ef8b", "#a6d96a", "#66bd63",
        "#1a9850", "#006837",
    ],
    &[
        "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#d9ef8b", "#a6d96a",
        "#66bd63", "#1a9850", "#006837",
    ],
];

const SPECTRAL: SchemeTable = &[
    &["#fc8d59", "#ffffbf", "#99d594"],
    &["#d7191c", "#fdae61", "#abdda4", "#2b83ba"],
    &["#d7191c", "#fdae61", "#ffffbf", "#abdda4", "#2b83ba"],
    &["#d53e4f", "#fc8d59", "#fee08b", "#e6f598", "#99d594", "#3288bd"],
    &["#d53e4f", "#fc8d59", "#fee08b", "#ffffbf", "#e6f598", "#99d594", "#3288bd"],
    &["#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#e6f598", "#abdda4", "#66c2a5", "#3288bd"],
    &[
        "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598", "#abdda4", "#66c2a5",
        "#3288bd",
    ],
    &[
        "#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#e6f598", "#abdda4", "#66c2a5",
        "#3288bd", "#5e4fa2",
    ],
    &[
        "#9e0142", "#d53e4f", "#f46d43", "#fdae61", "#fee08b", "#ffffbf", "#e6f598", "#abdda4",
        "#66c2a5", "#3288bd", "#5e4fa2",
    ],
];

const ACCENT: Scheme = &[
    "#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17", "#666666",
];

const DARK2: Scheme = &[
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666",
];

const PAIRED: Scheme = &[
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
    "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
];

const PASTEL1: Scheme = &[
    "#fbb4ae", "#b3cde3", "#ccebc5", "#decbe4", "#fed9a6", "#ffffcc", "#e5d8bd", "#fddaec",
    "#f2f2f2",
];

const PASTEL2: Scheme = &[
    "#b3e2cd", "#fdcdac", "#cbd5e8", "#f4cae4", "#e6f5c9", "#fff2ae", "#f1e2cc", "#cccccc",
];

const SET1: Scheme = &[
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];

const SET2: Scheme = &[
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

const SET3: Scheme = &[
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

const DIVERGING: &[(&str, SchemeTable)] = &[
    ("BrBG", BRBG),
    ("PiYG", PIYG),
    ("PRGn", PRGN),
    ("PuOr", PU_OR),
    ("RdBu", RD_BU),
    ("RdGy", RD_GY),
    ("RdYlBu", RD_YL_BU),
    ("RdYlGn", RD_YL_GN),
    ("Spectral", SPECTRAL),
];

const SEQUENTIAL: &[(&str, SchemeTable)] = &[
    ("YlGn", YL_GN),
    ("YlGnBu", YL_GN_BU),
    ("GnBu", GN_BU),
    ("BuGn", BU_GN),
    ("PuBuGn", PU_BU_GN),
    ("PuBu", PU_BU),
    ("BuPu", BU_PU),
    ("RdPu", RD_PU),
    ("PuRd", PU_RD),
    ("OrRd", OR_RD),
    ("YlOrRd", YL_OR_RD),
    ("YlOrBr", YL_OR_BR),
    ("Purples", PURPLES),
    ("Blues", BLUES),
    ("Greens", GREENS),
    ("Oranges", ORANGES),
    ("Reds", REDS),
    ("Greys", GREYS),
];

const QUALITATIVE: &[(&str, Scheme)] = &[
    ("Accent", ACCENT),
    ("Dark2", DARK2),
    ("Paired", PAIRED),
    ("Pastel1", PASTEL1),
    ("Pastel2", PASTEL2),
    ("Set1", SET1),
    ("Set2", SET2),
    ("Set3", SET3),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spectral_is_reversed() {
        let registry = PaletteRegistry::builtin();
        let p = registry.select(&PaletteSpec::default());
        assert_eq!(p.len(), 11);
        assert_eq!(p.family, Some(PaletteFamily::Diverging));
        assert_eq!(p.colors[0], "#5e4fa2");
        assert_eq!(p.colors[10], "#9e0142");

        let forward = registry
            .lookup("Spectral_11", Orientation::Reversed)
            .unwrap();
        assert_eq!(forward.colors[0], "#9e0142");
    }

    #[test]
    fn test_sequential_keeps_orientation() {
        let registry = PaletteRegistry::builtin();
        let p = registry.lookup("Blues_9", Orientation::Forward).unwrap();
        assert_eq!(p.colors.first().map(String::as_str), Some("#f7fbff"));
        let r = registry.lookup("Blues_9", Orientation::Reversed).unwrap();
        assert_eq!(r.colors.first().map(String::as_str), Some("#08306b"));
    }

    #[test]
    fn test_smaller_schemes_are_published_tables() {
        let registry = PaletteRegistry::builtin();
        let p = registry.lookup("Reds_5", Orientation::Forward).unwrap();
        assert_eq!(p.name, "Reds_5");
        assert_eq!(
            p.colors,
            vec!["#fee5d9", "#fcae91", "#fb6a4a", "#de2d26", "#a50f15"]
        );

        // Diverging schemes are flipped for "+", so "-" yields the table order.
        let s = registry.lookup("Spectral_5", Orientation::Reversed).unwrap();
        assert_eq!(
            s.colors,
            vec!["#d7191c", "#fdae61", "#ffffbf", "#abdda4", "#2b83ba"]
        );
        let s = registry.lookup("Spectral_5", Orientation::Forward).unwrap();
        assert_eq!(s.colors[0], "#2b83ba");

        let q = registry.lookup("Set1_4", Orientation::Forward).unwrap();
        assert_eq!(q.colors, vec!["#e41a1c", "#377eb8", "#4daf4a", "#984ea3"]);
    }

    #[test]
    fn test_every_scheme_has_its_size() {
        for &(name, schemes) in DIVERGING.iter().chain(SEQUENTIAL) {
            for (i, scheme) in schemes.iter().enumerate() {
                assert_eq!(scheme.len(), i + MIN_SCHEME_COLORS, "{}", name);
            }
        }
        for &(name, colors) in QUALITATIVE {
            assert!(colors.len() >= 8, "{}", name);
        }
    }

    #[test]
    fn test_invalid_names() {
        let registry = PaletteRegistry::builtin();
        assert!(registry.lookup("Blues_12", Orientation::Forward).is_none());
        assert!(registry.lookup("Blues_2", Orientation::Forward).is_none());
        assert!(registry.lookup("Set1_2", Orientation::Forward).is_none());
        assert!(registry.lookup("Viridis_5", Orientation::Forward).is_none());
        assert!(registry.lookup("Blues_x", Orientation::Forward).is_none());
        assert_eq!(registry.lookup("Dark2", Orientation::Forward).unwrap().len(), 8);

        let fallback = registry.select(&PaletteSpec {
            name: "NoSuchPalette".into(),
            ..Default::default()
        });
        assert_eq!(fallback.name, DEFAULT_PALETTE);
        assert_eq!(fallback.colors[0], "#5e4fa2");
    }

    #[test]
    fn test_custom_colors_override() {
        let registry = PaletteRegistry::builtin();
        let colors = vec!["#000000".to_string(), "#777777".to_string(), "#ffffff".to_string()];
        let p = registry.select(&PaletteSpec {
            custom_colors: Some(colors.clone()),
            ..Default::default()
        });
        assert_eq!(p.colors, colors);
        assert_eq!(p.family, None);
        assert_eq!(p.color(1), "#777777");
        assert_eq!(p.color(99), "#ffffff");
    }

    #[test]
    fn test_orientation_parsing() {
        assert_eq!("+".parse::<Orientation>(), Ok(Orientation::Forward));
        assert_eq!("-".parse::<Orientation>(), Ok(Orientation::Reversed));
        assert!("x".parse::<Orientation>().is_err());
        assert_eq!(Orientation::Reversed.to_string(), "-");
    }

    #[test]
    fn test_registry_families() {
        let registry = PaletteRegistry::builtin();
        assert_eq!(registry.family("PuOr_5"), Some(PaletteFamily::Diverging));
        assert_eq!(registry.family("YlGnBu_9"), Some(PaletteFamily::Sequential));
        assert_eq!(registry.family("Pastel1"), Some(PaletteFamily::Qualitative));
        assert_eq!(registry.family("Viridis_5"), None);

        let names = registry.names();
        assert!(names.contains(&(PaletteFamily::Diverging, "RdYlGn_3".to_string())));
        assert!(names.contains(&(PaletteFamily::Qualitative, "Paired_12".to_string())));
        assert!(!names.contains(&(PaletteFamily::Sequential, "Greys_10".to_string())));
        // 9 diverging (3..=11), 18 sequential (3..=9), qualitative prefixes from 3
        let qualitative: usize = QUALITATIVE.iter().map(|(_, c)| c.len() - 2).sum();
        assert_eq!(names.len(), 9 * 9 + 18 * 7 + qualitative);
        assert_eq!(names[0].0, PaletteFamily::Diverging);
    }
}
