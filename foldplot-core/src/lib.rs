//! foldplot core library
//!
//! Turns tabular alignment records into identity-colored plot geometry:
//! record normalization, color classification, symmetric expansion, dot and
//! folded (diamond) projections, and the identity histogram.

pub mod error;
pub mod types;
pub mod normalize;
pub mod classify;
pub mod coords;
pub mod expand;
pub mod dot;
pub mod diamond;
pub mod histogram;
pub mod palette;
pub mod pipeline;

// Re-export commonly used types and functions
pub use error::{PlotError, PlotResult};
pub use types::{AlignmentRecord, ColorClass, ComparisonKind, GenomicPos, Strand};
pub use normalize::{detect_schema, normalize, RawTable, Schema};
pub use classify::{classify_records, compute_breakpoints, Breakpoints, ColorMode};
pub use coords::CoordFrame;
pub use expand::expand_symmetric;
pub use dot::{project_dot, DotProjection, DotTile};
pub use diamond::{project_diamonds, DiamondProjection, DiamondVertex};
pub use histogram::{build_histogram, Histogram, HistogramBin, HISTOGRAM_BINS};
pub use palette::{
    Orientation, Palette, PaletteFamily, PaletteRegistry, PaletteResolver, PaletteSpec,
};
pub use pipeline::{Pipeline, PlotOutput, PlotParams};

/// Version information for the foldplot core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
