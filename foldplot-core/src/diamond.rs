//! Folded ("triangle") projection for self-comparisons
//!
//! Normalized positions are rotated by 45 degrees (`w = first + second`,
//! `z = second - first`), so the diagonal of the self-identity matrix lies on
//! the x axis and each off-diagonal band becomes a row of diamonds above it.
//! Every record turns into a rhombus of four vertices tagged with a shared
//! `group_id` so renderers can fill one polygon per record.
//!
//! The rotated space is mapped back to genomic units on the x axis with
//! `tri_scale = max(q_start) / max(w)`; the y axis keeps the compressed
//! `z * window` spread.

use crate::coords::window_size;
use crate::error::{PlotError, PlotResult};
use crate::types::{AlignmentRecord, ColorClass};
use serde::Serialize;
use std::f64::consts::FRAC_1_SQRT_2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Point in the rotated, window-normalized space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotatedPoint {
    pub w: f64,
    pub z: f64,
}

impl RotatedPoint {
    pub fn from_positions(first_pos: f64, second_pos: f64) -> Self {
        Self {
            w: first_pos + second_pos,
            z: second_pos - first_pos,
        }
    }
}

const UNIT_DIAMOND: [(f64, f64); 4] = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];

/// Rhombus around `center` whose sides have length `side`.
///
/// Vertices sit on the two axes through the center at `side * sqrt(2) / 2`,
/// in counter-clockwise order starting from the right.
pub fn diamond_vertices(center: RotatedPoint, side: f64) -> [RotatedPoint; 4] {
    let r = side * FRAC_1_SQRT_2;
    UNIT_DIAMOND.map(|(dw, dz)| RotatedPoint {
        w: center.w + dw * r,
        z: center.z + dz * r,
    })
}

/// One polygon vertex in render coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiamondVertex {
    pub x: f64,
    pub y: f64,
    pub color_class: ColorClass,
    pub group_id: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiamondProjection {
    /// Four consecutive vertices per source record
    pub vertices: Vec<DiamondVertex>,
    pub tri_scale: f64,
    /// Rhombus side length in rotated units
    pub window: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl DiamondProjection {
    pub fn num_polygons(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Vertices grouped per record
    pub fn polygons(&self) -> impl Iterator<Item = &[DiamondVertex]> {
        self.vertices.chunks_exact(4)
    }

    /// Axis ranges; the lower bound of both axes is zero
    pub fn x_range(&self) -> (f64, f64) {
        (0.0, self.x_max)
    }

    pub fn y_range(&self) -> (f64, f64) {
        (0.0, self.y_max)
    }
}

/// Build the folded projection from records with assigned positions.
///
/// Fails with a configuration error when the rotated positions have no spread
/// (`max(w) == 0`) or the resulting scale is not a positive finite number.
pub fn project_diamonds(records: &[AlignmentRecord]) -> PlotResult<DiamondProjection> {
    if records.is_empty() {
        return Err(PlotError::EmptyDataset);
    }

    let centers: Vec<RotatedPoint> = records
        .iter()
        .map(|r| RotatedPoint::from_positions(r.first_pos, r.second_pos))
        .collect();

    let max_w = centers.iter().map(|c| c.w).fold(f64::NEG_INFINITY, f64::max);
    let max_q_start = records.iter().map(|r| r.q_start).max().unwrap_or(0) as f64;
    if max_w <= 0.0 {
        return Err(PlotError::config(
            "no spatial spread: every alignment starts at position 0",
        ));
    }
    let tri_scale = max_q_start / max_w;
    if !tri_scale.is_finite() || tri_scale <= 0.0 {
        return Err(PlotError::config(format!(
            "no spatial spread: triangle scale {} is not positive",
            tri_scale
        )));
    }
    let window = window_size(records) as f64 / tri_scale;

    let to_vertices = |(group_id, (center, record)): (usize, (&RotatedPoint, &AlignmentRecord))| {
        diamond_vertices(*center, window).map(|v| DiamondVertex {
            x: tri_scale * v.w,
            y: v.z * window,
            color_class: record.color_class,
            group_id,
        })
    };

    #[cfg(feature = "parallel")]
    let vertices: Vec<DiamondVertex> = centers
        .par_iter()
        .zip(records.par_iter())
        .enumerate()
        .flat_map_iter(to_vertices)
        .collect();
    #[cfg(not(feature = "parallel"))]
    let vertices: Vec<DiamondVertex> = centers
        .iter()
        .zip(records.iter())
        .enumerate()
        .flat_map(to_vertices)
        .collect();

    let x_max = vertices.iter().map(|v| v.x).fold(0.0, f64::max);
    let y_max = vertices.iter().map(|v| v.y).fold(0.0, f64::max);

    log::debug!(
        "Diamond projection: {} polygons, tri_scale {:.3}, window {:.4}",
        records.len(),
        tri_scale,
        window
    );

    Ok(DiamondProjection {
        vertices,
        tri_scale,
        window,
        x_max,
        y_max,
    })
}
