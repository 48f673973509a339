//! Identity distribution histogram
//!
//! Equal-width bins over the observed identity range. The display window runs
//! from the 0.1th percentile of the data (hiding the sparse low tail) up to
//! 100; it only affects rendering, every record is counted.

use crate::classify::{quantile, sorted_identities, IDENTITY_MAX};
use crate::error::{PlotError, PlotResult};
use crate::types::{AlignmentRecord, ColorClass};
use serde::Serialize;

pub const HISTOGRAM_BINS: usize = 300;

/// Probability of the lower display bound
pub const DISPLAY_QUANTILE: f64 = 0.001;

/// Above this many records, renderers label counts in thousands
pub const SCALED_COUNT_THRESHOLD: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    /// Most frequent class among the bin's records, lowest class on ties
    pub color_class: Option<ColorClass>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    pub display_min: f64,
    pub display_max: f64,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn scaled_counts(&self) -> bool {
        self.total() > SCALED_COUNT_THRESHOLD
    }
}

pub fn build_histogram(records: &[AlignmentRecord], num_bins: usize) -> PlotResult<Histogram> {
    if num_bins == 0 {
        return Err(PlotError::config("histogram needs at least one bin"));
    }
    let sorted = sorted_identities(records);
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Err(PlotError::EmptyDataset);
    };

    // A single distinct value still gets a non-empty range to bin into.
    let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, min + 0.5) };
    let width = (hi - lo) / num_bins as f64;

    let num_classes = records.iter().map(|r| r.color_class).max().unwrap_or(0) + 1;
    let mut counts = vec![0usize; num_bins];
    let mut class_tally = vec![vec![0usize; num_classes]; num_bins];

    for r in records {
        let idx = (((r.identity - lo) / width).floor().max(0.0) as usize).min(num_bins - 1);
        counts[idx] += 1;
        class_tally[idx][r.color_class] += 1;
    }

    let bins = (0..num_bins)
        .map(|i| HistogramBin {
            start: lo + i as f64 * width,
            end: lo + (i + 1) as f64 * width,
            count: counts[i],
            color_class: dominant_class(&class_tally[i]),
        })
        .collect();

    let display_min = quantile(&sorted, DISPLAY_QUANTILE).unwrap_or(min);

    Ok(Histogram {
        bins,
        display_min,
        display_max: IDENTITY_MAX,
    })
}

fn dominant_class(tally: &[usize]) -> Option<ColorClass> {
    let mut best: Option<(ColorClass, usize)> = None;
    for (class, &n) in tally.iter().enumerate() {
        if n > 0 && best.map_or(true, |(_, m)| n > m) {
            best = Some((class, n));
        }
    }
    best.map(|(class, _)| class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn records(values: &[(f64, usize)]) -> Vec<AlignmentRecord> {
        values
            .iter()
            .map(|&(id, class)| {
                let mut r = AlignmentRecord::new("a".into(), 0, 10, "a".into(), 0, 10, id);
                r.color_class = class;
                r
            })
            .collect()
    }

    #[test]
    fn test_bins_span_observed_range() {
        let recs = records(&[(70.0, 0), (85.0, 1), (100.0, 2)]);
        let h = build_histogram(&recs, HISTOGRAM_BINS).unwrap();
        assert_eq!(h.bins.len(), 300);
        assert_eq!(h.bins[0].start, 70.0);
        assert!((h.bins[299].end - 100.0).abs() < 1e-9);
        assert_eq!(h.bins[0].count, 1);
        assert_eq!(h.bins[299].count, 1);
        assert_eq!(h.bins[150].count, 1);
        assert_eq!(h.total(), 3);
        assert_eq!(h.display_max, 100.0);
    }

    #[test]
    fn test_display_min_is_low_percentile() {
        let mut values: Vec<(f64, usize)> = (0..1000).map(|i| (90.0 + i as f64 / 100.0, 0)).collect();
        values.push((10.0, 0));
        let h = build_histogram(&records(&values), HISTOGRAM_BINS).unwrap();
        assert!(h.display_min > 10.0);
        assert!(h.display_min <= 90.0);
    }

    #[test]
    fn test_dominant_class() {
        let recs = records(&[(80.0, 1), (80.0, 2), (80.0, 2), (90.0, 0), (90.0, 3), (99.0, 4)]);
        let h = build_histogram(&recs, 2).unwrap();
        assert_eq!(h.bins[0].color_class, Some(2));
        // tie between class 0 and 3 in the upper bin: lower class wins
        assert_eq!(h.bins[1].count, 3);
        assert_eq!(h.bins[1].color_class, Some(0));
        assert_eq!(dominant_class(&[0, 0, 0]), None);
    }

    #[test]
    fn test_single_value() {
        let recs = records(&[(97.0, 0), (97.0, 0)]);
        let h = build_histogram(&recs, HISTOGRAM_BINS).unwrap();
        assert_eq!(h.total(), 2);
        assert_eq!(h.max_count(), 2);
        let full = h.bins.iter().find(|b| b.count == 2).unwrap();
        let mid = (full.start + full.end) / 2.0;
        assert!((mid - 97.0).abs() < 2.0 / 300.0);
        assert_eq!(h.display_min, 97.0);
        assert!(!h.scaled_counts());
    }

    #[test]
    fn test_errors() {
        assert_eq!(build_histogram(&[], 300), Err(PlotError::EmptyDataset));
        let recs = records(&[(97.0, 0)]);
        assert!(matches!(build_histogram(&recs, 0), Err(PlotError::Config { .. })));
    }

    proptest! {
        #[test]
        fn prop_total_equals_record_count(
            values in proptest::collection::vec((0.0f64..=100.0, 0usize..11), 1..500),
            num_bins in 1usize..400,
        ) {
            let recs = records(&values);
            let h = build_histogram(&recs, num_bins).unwrap();
            prop_assert_eq!(h.bins.len(), num_bins);
            prop_assert_eq!(h.total(), recs.len());
        }
    }
}
