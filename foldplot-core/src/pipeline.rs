//! End-to-end transform from a raw alignment table to plot geometry

use crate::classify::{classify_records, Breakpoints, ColorMode};
use crate::coords::CoordFrame;
use crate::diamond::{project_diamonds, DiamondProjection};
use crate::dot::{project_dot, DotProjection};
use crate::error::PlotResult;
use crate::expand::expand_symmetric;
use crate::histogram::{build_histogram, Histogram, HISTOGRAM_BINS};
use crate::normalize::{normalize, RawTable};
use crate::palette::{Palette, PaletteRegistry, PaletteSpec};
use crate::types::{AlignmentRecord, ComparisonKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlotParams {
    pub palette: PaletteSpec,
    pub mode: ColorMode,
    pub comparison: ComparisonKind,
}

/// Everything a renderer needs for one dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotOutput {
    pub breakpoints: Breakpoints,
    pub palette: Palette,
    /// Resolved kind, never `Auto`
    pub comparison: ComparisonKind,
    pub dot: DotProjection,
    /// Present for self-comparisons only
    pub diamonds: Option<DiamondProjection>,
    pub histogram: Histogram,
    /// Classified records before any expansion
    pub records: Vec<AlignmentRecord>,
}

impl PlotOutput {
    pub fn is_self(&self) -> bool {
        self.comparison.is_self()
    }

    /// Sequence names of the first record, used for file naming
    pub fn sequence_names(&self) -> Option<(&str, &str)> {
        self.records
            .first()
            .map(|r| (r.query_name.as_str(), r.ref_name.as_str()))
    }
}

pub struct Pipeline {
    params: PlotParams,
    registry: PaletteRegistry,
}

impl Pipeline {
    pub fn new(params: PlotParams) -> Self {
        Self::with_registry(params, PaletteRegistry::builtin())
    }

    pub fn with_registry(params: PlotParams, registry: PaletteRegistry) -> Self {
        Self { params, registry }
    }

    pub fn params(&self) -> &PlotParams {
        &self.params
    }

    pub fn run(&self, table: &RawTable) -> PlotResult<PlotOutput> {
        let records = normalize(table)?;
        self.run_records(records)
    }

    /// Run every stage after normalization
    pub fn run_records(&self, mut records: Vec<AlignmentRecord>) -> PlotResult<PlotOutput> {
        let palette = self.registry.select(&self.params.palette);
        let breakpoints = classify_records(&mut records, palette.len(), &self.params.mode)?;

        let frame = CoordFrame::from_records(&records)?;
        frame.assign_positions(&mut records);

        let comparison = self.params.comparison.resolve(&records);
        log::info!(
            "Processing {} alignments ({} comparison, palette {}, {} classes)",
            records.len(),
            comparison,
            palette.name,
            breakpoints.num_classes()
        );

        let (dot, diamonds) = if comparison.is_self() {
            let expanded = expand_symmetric(&records);
            (project_dot(&expanded)?, Some(project_diamonds(&records)?))
        } else {
            (project_dot(&records)?, None)
        };
        let histogram = build_histogram(&records, HISTOGRAM_BINS)?;

        Ok(PlotOutput {
            breakpoints,
            palette,
            comparison,
            dot,
            diamonds,
            histogram,
            records,
        })
    }
}
