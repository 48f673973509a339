//! Symmetric expansion for self-comparisons
//!
//! A self-comparison only reports one triangle of the identity matrix. The
//! full matrix is recovered by adding, for every off-diagonal record, the
//! record with its query and reference intervals swapped.

use crate::types::AlignmentRecord;
use std::collections::HashSet;

/// Originals plus the mirror of every record whose intervals differ.
///
/// A mirror is only added when no record with the mirrored interval pair is
/// present yet, so expanding an already symmetric set returns it unchanged.
pub fn expand_symmetric(records: &[AlignmentRecord]) -> Vec<AlignmentRecord> {
    let mut seen: HashSet<_> = records.iter().map(|r| r.interval_key()).collect();
    let mut expanded = records.to_vec();

    for record in records.iter().filter(|r| !r.is_diagonal()) {
        let mirror = record.mirrored();
        if seen.insert(mirror.interval_key()) {
            expanded.push(mirror);
        }
    }

    log::debug!(
        "Symmetric expansion: {} records -> {}",
        records.len(),
        expanded.len()
    );
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(qs: u64, qe: u64, rs: u64, re: u64, id: f64) -> AlignmentRecord {
        AlignmentRecord::new("chr1".into(), qs, qe, "chr1".into(), rs, re, id)
    }

    #[test]
    fn test_mirrors_off_diagonal_records() {
        let records = vec![
            rec(0, 100, 0, 100, 100.0),
            rec(0, 100, 200, 300, 95.0),
            rec(100, 200, 300, 400, 90.0),
        ];
        let expanded = expand_symmetric(&records);
        assert_eq!(expanded.len(), 5);
        assert_eq!(&expanded[..3], &records[..]);
        assert!(expanded
            .iter()
            .any(|r| (r.q_start, r.q_end, r.r_start, r.r_end) == (200, 300, 0, 100) && r.identity == 95.0));
        assert!(expanded
            .iter()
            .any(|r| (r.q_start, r.q_end, r.r_start, r.r_end) == (300, 400, 100, 200)));
    }

    #[test]
    fn test_partial_overlap_is_not_diagonal() {
        // Same start, different end: still an off-diagonal interval pair.
        let records = vec![rec(0, 100, 0, 120, 99.0)];
        assert_eq!(expand_symmetric(&records).len(), 2);
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let records = vec![rec(0, 100, 0, 100, 100.0), rec(0, 100, 500, 600, 92.0)];
        let once = expand_symmetric(&records);
        let twice = expand_symmetric(&once);
        assert_eq!(once.len(), 3);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_existing_mirror_is_not_duplicated() {
        let records = vec![rec(0, 100, 500, 600, 92.0), rec(500, 600, 0, 100, 92.5)];
        assert_eq!(expand_symmetric(&records).len(), 2);
    }
}
