//! Axis-aligned dot projection
//!
//! Each alignment becomes a square tile centered on `(q_start, r_start)` whose
//! side is the dataset-wide window, so every tile has the same size no matter
//! how long its own interval is. Both axes share the range `[0, max_extent]`
//! to keep the matrix square.

use crate::coords::CoordFrame;
use crate::error::PlotResult;
use crate::types::{AlignmentRecord, ColorClass, GenomicPos};
use serde::Serialize;
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One tile of the dot matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotTile {
    pub query_name: String,
    pub ref_name: String,
    /// Tile center on the query axis
    pub x: f64,
    /// Tile center on the reference axis
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color_class: ColorClass,
}

/// Axis-aligned rectangle in genomic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl DotTile {
    fn from_record(record: &AlignmentRecord, window: GenomicPos) -> Self {
        Self {
            query_name: record.query_name.clone(),
            ref_name: record.ref_name.clone(),
            x: record.q_start as f64,
            y: record.r_start as f64,
            width: window as f64,
            height: window as f64,
            color_class: record.color_class,
        }
    }

    /// Tile rectangle clipped to `[0, extent]` on both axes, `None` if nothing remains
    pub fn clipped(&self, extent: f64) -> Option<TileRect> {
        let x0 = (self.x - self.width / 2.0).max(0.0);
        let x1 = (self.x + self.width / 2.0).min(extent);
        let y0 = (self.y - self.height / 2.0).max(0.0);
        let y1 = (self.y + self.height / 2.0).min(extent);
        if x0 < x1 && y0 < y1 {
            Some(TileRect { x0, y0, x1, y1 })
        } else {
            None
        }
    }
}

/// Tiles sharing one (reference, query) sequence pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotPanel {
    pub ref_name: String,
    pub query_name: String,
    pub tile_indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotProjection {
    pub tiles: Vec<DotTile>,
    pub window: GenomicPos,
    pub max_extent: GenomicPos,
}

impl DotProjection {
    /// Shared range of both axes
    pub fn axis_range(&self) -> (f64, f64) {
        (0.0, self.max_extent as f64)
    }

    /// Group tiles by sequence pair, ordered by reference then query name
    pub fn panels(&self) -> Vec<DotPanel> {
        let mut groups: BTreeMap<(&str, &str), Vec<usize>> = BTreeMap::new();
        for (i, tile) in self.tiles.iter().enumerate() {
            groups
                .entry((tile.ref_name.as_str(), tile.query_name.as_str()))
                .or_default()
                .push(i);
        }
        groups
            .into_iter()
            .map(|((ref_name, query_name), tile_indices)| DotPanel {
                ref_name: ref_name.to_string(),
                query_name: query_name.to_string(),
                tile_indices,
            })
            .collect()
    }
}

/// Project classified records onto the square dot matrix.
///
/// The window and extent are taken from `records` itself, which for a
/// self-comparison is the symmetrically expanded set.
pub fn project_dot(records: &[AlignmentRecord]) -> PlotResult<DotProjection> {
    let frame = CoordFrame::from_records(records)?;

    #[cfg(feature = "parallel")]
    let tiles: Vec<DotTile> = records
        .par_iter()
        .map(|r| DotTile::from_record(r, frame.window))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let tiles: Vec<DotTile> = records
        .iter()
        .map(|r| DotTile::from_record(r, frame.window))
        .collect();

    log::debug!(
        "Dot projection: {} tiles, window {}, extent {}",
        tiles.len(),
        frame.window,
        frame.max_extent
    );

    Ok(DotProjection {
        tiles,
        window: frame.window,
        max_extent: frame.max_extent,
    })
}
