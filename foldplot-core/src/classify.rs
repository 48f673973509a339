//! Identity color classification
//!
//! Every record gets a discrete `color_class` from its identity estimate.
//! Breakpoints come from one of three strategies:
//!
//! * **Equal width** (default): `num_colors` intervals of equal width spanning
//!   `[floor(min identity), 100]`.
//! * **Frequency**: quantiles of the identity distribution at probabilities
//!   `0, 1/n, ..., 1`. Identical quantiles are collapsed, so a heavily skewed
//!   distribution can end up with fewer classes than colors.
//! * **Custom**: `num_colors - 1` ascending thresholds from the caller. The
//!   thresholds are kept as given even when one coincides with the data
//!   minimum or maximum, so threshold `k` always opens class `k + 1`.
//!
//! Bucket `i` is the half-open range `[e_i, e_(i+1))`; the last bucket is also
//! closed on the right so the maximum lands in the top class.

use crate::error::{PlotError, PlotResult};
use crate::types::{AlignmentRecord, ColorClass};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub const MIN_COLORS: usize = 3;
pub const MAX_COLORS: usize = 11;

/// Identity upper bound used by equal-width binning
pub const IDENTITY_MAX: f64 = 100.0;

/// Breakpoint strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    #[default]
    EqualWidth,
    Frequency,
    /// Interior thresholds, `num_colors - 1` of them, strictly ascending
    Custom(Vec<f64>),
}

/// Ordered bin edges shared by every record of a dataset.
///
/// Computed edges are deduplicated; custom thresholds are not, so an edge may
/// repeat and leave an empty class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoints {
    edges: Vec<f64>,
}

impl Breakpoints {
    fn from_edges(mut edges: Vec<f64>) -> Self {
        edges.sort_by(|a, b| a.total_cmp(b));
        edges.dedup();
        Self { edges }
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of distinct classes these edges produce (at least one)
    pub fn num_classes(&self) -> usize {
        self.edges.len().saturating_sub(1).max(1)
    }

    /// Class index for an identity value
    pub fn classify(&self, identity: f64) -> ColorClass {
        if self.edges.len() <= 2 {
            return 0;
        }
        let interior = &self.edges[1..self.edges.len() - 1];
        interior.partition_point(|&edge| edge <= identity)
    }
}

/// Linear-interpolation quantile of an ascending slice (`h = (n - 1) * p`)
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

pub(crate) fn sorted_identities(records: &[AlignmentRecord]) -> Vec<f64> {
    let mut values: Vec<f64> = records.iter().map(|r| r.identity).collect();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

pub fn validate_num_colors(num_colors: usize) -> PlotResult<()> {
    if !(MIN_COLORS..=MAX_COLORS).contains(&num_colors) {
        return Err(PlotError::config(format!(
            "number of colors must be between {} and {}, got {}",
            MIN_COLORS, MAX_COLORS, num_colors
        )));
    }
    Ok(())
}

/// Compute breakpoints for a set of identity values
pub fn compute_breakpoints(
    identities: &[f64],
    num_colors: usize,
    mode: &ColorMode,
) -> PlotResult<Breakpoints> {
    validate_num_colors(num_colors)?;
    if identities.is_empty() {
        return Err(PlotError::EmptyDataset);
    }

    let mut sorted = identities.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    let edges = match mode {
        ColorMode::EqualWidth => {
            let bot = min.floor();
            let interval = (IDENTITY_MAX - bot) / num_colors as f64;
            (0..=num_colors).map(|i| bot + i as f64 * interval).collect()
        }
        ColorMode::Frequency => (0..=num_colors)
            .filter_map(|i| quantile(&sorted, i as f64 / num_colors as f64))
            .collect(),
        ColorMode::Custom(thresholds) => {
            validate_thresholds(thresholds, num_colors)?;
            let mut edges = Vec::with_capacity(thresholds.len() + 2);
            edges.push(min.min(thresholds[0]));
            edges.extend_from_slice(thresholds);
            edges.push(max.max(thresholds[thresholds.len() - 1]));
            return Ok(Breakpoints { edges });
        }
    };

    Ok(Breakpoints::from_edges(edges))
}

fn validate_thresholds(thresholds: &[f64], num_colors: usize) -> PlotResult<()> {
    if thresholds.len() != num_colors - 1 {
        return Err(PlotError::config(format!(
            "expected {} breakpoints for {} colors, got {}",
            num_colors - 1,
            num_colors,
            thresholds.len()
        )));
    }
    if thresholds.iter().any(|t| !t.is_finite()) {
        return Err(PlotError::config("breakpoints must be finite numbers"));
    }
    if thresholds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(PlotError::config(format!(
            "breakpoints must be strictly ascending: {:?}",
            thresholds
        )));
    }
    Ok(())
}

/// Assign `color_class` to every record and return the breakpoints used
pub fn classify_records(
    records: &mut [AlignmentRecord],
    num_colors: usize,
    mode: &ColorMode,
) -> PlotResult<Breakpoints> {
    let identities: Vec<f64> = records.iter().map(|r| r.identity).collect();
    let breakpoints = compute_breakpoints(&identities, num_colors, mode)?;

    log::debug!(
        "Classification edges ({:?}): {:?}",
        mode,
        breakpoints.edges()
    );
    if breakpoints.num_classes() < num_colors {
        log::debug!(
            "Only {} of {} color classes are distinguishable for this dataset",
            breakpoints.num_classes(),
            num_colors
        );
    }

    #[cfg(feature = "parallel")]
    records
        .par_iter_mut()
        .for_each(|r| r.color_class = breakpoints.classify(r.identity));
    #[cfg(not(feature = "parallel"))]
    records
        .iter_mut()
        .for_each(|r| r.color_class = breakpoints.classify(r.identity));

    Ok(breakpoints)
}

/// Number of records per class, indexed by class
pub fn class_counts(records: &[AlignmentRecord], num_classes: usize) -> Vec<usize> {
    let mut counts = vec![0usize; num_classes];
    for r in records {
        if let Some(c) = counts.get_mut(r.color_class) {
            *c += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn records(identities: &[f64]) -> Vec<AlignmentRecord> {
        identities
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let s = i as u64 * 100;
                AlignmentRecord::new("a".into(), s, s + 100, "a".into(), s, s + 100, id)
            })
            .collect()
    }

    #[test]
    fn test_equal_width_edges_and_classes() {
        let ids = [60.0, 70.0, 80.0, 90.0, 100.0];
        let bp = compute_breakpoints(&ids, 4, &ColorMode::EqualWidth).unwrap();
        assert_eq!(bp.edges(), &[60.0, 70.0, 80.0, 90.0, 100.0]);
        assert_eq!(bp.classify(60.0), 0);
        assert_eq!(bp.classify(69.99), 0);
        assert_eq!(bp.classify(70.0), 1);
        assert_eq!(bp.classify(90.0), 3);
        assert_eq!(bp.classify(100.0), 3);
    }

    #[test]
    fn test_equal_width_floors_minimum() {
        let bp = compute_breakpoints(&[85.7, 99.0], 3, &ColorMode::EqualWidth).unwrap();
        assert_eq!(bp.edges()[0], 85.0);
        assert_eq!(bp.edges()[3], 100.0);
        assert_eq!(bp.num_classes(), 3);
    }

    #[test]
    fn test_num_colors_bounds() {
        for n in [0, 1, 2, 12, 20] {
            assert!(matches!(
                compute_breakpoints(&[90.0], n, &ColorMode::EqualWidth),
                Err(PlotError::Config { .. })
            ));
        }
        assert!(compute_breakpoints(&[90.0], 3, &ColorMode::EqualWidth).is_ok());
        assert!(compute_breakpoints(&[90.0], 11, &ColorMode::EqualWidth).is_ok());
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&v, 0.0), Some(1.0));
        assert_eq!(quantile(&v, 1.0), Some(4.0));
        assert_eq!(quantile(&v, 0.5), Some(2.5));
        assert!((quantile(&v, 1.0 / 3.0).unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_frequency_mode_balances_classes() {
        let ids: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let mut recs = records(&ids);
        let bp = classify_records(&mut recs, 4, &ColorMode::Frequency).unwrap();
        assert_eq!(bp.num_classes(), 4);
        assert_eq!(class_counts(&recs, 4), vec![25, 25, 25, 25]);
    }

    #[test]
    fn test_frequency_mode_collapses_duplicate_edges() {
        let ids = [90.0, 90.0, 90.0, 90.0, 90.0, 99.0];
        let bp = compute_breakpoints(&ids, 5, &ColorMode::Frequency).unwrap();
        assert!(bp.num_classes() < 5);
        assert!(bp.edges().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_single_value_dataset_is_one_class() {
        let mut recs = records(&[97.0, 97.0, 97.0]);
        let bp = classify_records(&mut recs, 5, &ColorMode::Frequency).unwrap();
        assert_eq!(bp.edges().len(), 1);
        assert!(recs.iter().all(|r| r.color_class == 0));

        let mut recs = records(&[100.0, 100.0]);
        classify_records(&mut recs, 5, &ColorMode::EqualWidth).unwrap();
        assert!(recs.iter().all(|r| r.color_class == 0));
    }

    #[test]
    fn test_custom_breakpoints() {
        let mode = ColorMode::Custom(vec![80.0, 90.0, 95.0]);
        let mut recs = records(&[50.0, 80.0, 89.9, 92.0, 95.0, 100.0]);
        classify_records(&mut recs, 4, &mode).unwrap();
        let classes: Vec<usize> = recs.iter().map(|r| r.color_class).collect();
        assert_eq!(classes, vec![0, 1, 1, 2, 3, 3]);
    }

    #[test]
    fn test_custom_threshold_at_data_minimum() {
        let mode = ColorMode::Custom(vec![80.0, 90.0, 95.0]);
        let mut recs = records(&[80.0, 92.0, 99.0]);
        let bp = classify_records(&mut recs, 4, &mode).unwrap();
        let classes: Vec<usize> = recs.iter().map(|r| r.color_class).collect();
        assert_eq!(classes, vec![1, 2, 3]);
        assert_eq!(bp.num_classes(), 4);
        assert_eq!(bp.edges(), &[80.0, 80.0, 90.0, 95.0, 99.0]);
    }

    #[test]
    fn test_custom_thresholds_below_data_minimum() {
        let mode = ColorMode::Custom(vec![80.0, 90.0, 95.0]);
        let mut recs = records(&[85.0, 91.0, 97.0]);
        let bp = classify_records(&mut recs, 4, &mode).unwrap();
        let classes: Vec<usize> = recs.iter().map(|r| r.color_class).collect();
        assert_eq!(classes, vec![1, 2, 3]);
        assert_eq!(bp.edges()[0], 80.0);
        assert_eq!(class_counts(&recs, bp.num_classes()), vec![0, 1, 1, 1]);
    }

    #[test]
    fn test_custom_threshold_at_data_maximum() {
        let mode = ColorMode::Custom(vec![80.0, 90.0, 95.0]);
        let mut recs = records(&[50.0, 95.0]);
        let bp = classify_records(&mut recs, 4, &mode).unwrap();
        assert_eq!(recs[0].color_class, 0);
        assert_eq!(recs[1].color_class, 3);
        assert_eq!(bp.edges(), &[50.0, 80.0, 90.0, 95.0, 95.0]);
        assert_eq!(bp.num_classes(), 4);
    }

    #[test]
    fn test_custom_breakpoint_validation() {
        let ids = [90.0];
        let wrong_count = ColorMode::Custom(vec![80.0, 90.0]);
        assert!(matches!(
            compute_breakpoints(&ids, 4, &wrong_count),
            Err(PlotError::Config { .. })
        ));
        let descending = ColorMode::Custom(vec![95.0, 90.0, 80.0]);
        assert!(compute_breakpoints(&ids, 4, &descending).is_err());
        let nan = ColorMode::Custom(vec![80.0, f64::NAN, 95.0]);
        assert!(compute_breakpoints(&ids, 4, &nan).is_err());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let ids = [71.3, 88.8, 93.1, 99.9, 64.0, 88.8];
        let mut a = records(&ids);
        let mut b = records(&ids);
        let bp_a = classify_records(&mut a, 7, &ColorMode::Frequency).unwrap();
        let bp_b = classify_records(&mut b, 7, &ColorMode::Frequency).unwrap();
        assert_eq!(bp_a, bp_b);
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_classes_within_palette(
            ids in proptest::collection::vec(0.0f64..=100.0, 1..200),
            n in MIN_COLORS..=MAX_COLORS,
            freq in any::<bool>(),
        ) {
            let mode = if freq { ColorMode::Frequency } else { ColorMode::EqualWidth };
            let mut recs = records(&ids);
            let bp = classify_records(&mut recs, n, &mode).unwrap();
            prop_assert!(bp.num_classes() <= n);
            for r in &recs {
                prop_assert!(r.color_class < n);
                prop_assert!(r.color_class < bp.num_classes());
            }
        }
    }
}
