use crate::error::{PlotError, PlotResult};
use crate::types::*;

/// Dataset-wide normalization constants.
///
/// Computed once from the classified records and passed by reference to every
/// later stage; nothing downstream recomputes or mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordFrame {
    /// Largest query interval length, the unit of normalized positions
    pub window: GenomicPos,
    /// Largest end coordinate on either axis
    pub max_extent: GenomicPos,
}

impl CoordFrame {
    pub fn from_records(records: &[AlignmentRecord]) -> PlotResult<Self> {
        if records.is_empty() {
            return Err(PlotError::EmptyDataset);
        }
        let window = window_size(records);
        if window == 0 {
            return Err(PlotError::config(
                "every query interval has zero length; cannot derive a window size",
            ));
        }
        Ok(Self {
            window,
            max_extent: max_extent(records),
        })
    }

    pub fn normalize(&self, pos: GenomicPos) -> f64 {
        pos as f64 / self.window as f64
    }

    /// Fill `first_pos` / `second_pos` in window units
    pub fn assign_positions(&self, records: &mut [AlignmentRecord]) {
        for r in records.iter_mut() {
            r.first_pos = self.normalize(r.q_start);
            r.second_pos = self.normalize(r.r_start);
        }
    }
}

pub fn window_size(records: &[AlignmentRecord]) -> GenomicPos {
    records.iter().map(|r| r.query_len()).max().unwrap_or(0)
}

pub fn max_extent(records: &[AlignmentRecord]) -> GenomicPos {
    records
        .iter()
        .map(|r| r.q_end.max(r.r_end))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(qs: u64, qe: u64, rs: u64, re: u64) -> AlignmentRecord {
        AlignmentRecord::new("s".into(), qs, qe, "s".into(), rs, re, 99.0)
    }

    #[test]
    fn test_frame_constants() {
        let records = vec![rec(0, 5000, 0, 5000), rec(5000, 9000, 10000, 14000)];
        let frame = CoordFrame::from_records(&records).unwrap();
        assert_eq!(frame.window, 5000);
        assert_eq!(frame.max_extent, 14000);
    }

    #[test]
    fn test_assign_positions() {
        let mut records = vec![rec(0, 5000, 0, 5000), rec(5000, 10000, 10000, 15000)];
        let frame = CoordFrame::from_records(&records).unwrap();
        frame.assign_positions(&mut records);
        assert_eq!((records[1].first_pos, records[1].second_pos), (1.0, 2.0));
        assert_eq!((records[0].first_pos, records[0].second_pos), (0.0, 0.0));
    }

    #[test]
    fn test_degenerate_frames() {
        assert_eq!(CoordFrame::from_records(&[]), Err(PlotError::EmptyDataset));
        assert!(matches!(
            CoordFrame::from_records(&[rec(10, 10, 0, 5)]),
            Err(PlotError::Config { .. })
        ));
    }
}
