use serde::{Deserialize, Serialize};
use std::fmt;

pub type GenomicPos = u64;
pub type ColorClass = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

impl Strand {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }
}

/// One alignment interval pair with its identity estimate.
///
/// `color_class`, `first_pos` and `second_pos` are filled in by the
/// classification and coordinate stages of the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentRecord {
    pub query_name: String,
    pub ref_name: String,
    pub q_start: GenomicPos,
    pub q_end: GenomicPos,
    pub r_start: GenomicPos,
    pub r_end: GenomicPos,
    pub identity: f64,
    pub strand: Option<Strand>,
    pub color_class: ColorClass,
    pub first_pos: f64,
    pub second_pos: f64,
}

impl AlignmentRecord {
    pub fn new(
        query_name: String,
        q_start: GenomicPos,
        q_end: GenomicPos,
        ref_name: String,
        r_start: GenomicPos,
        r_end: GenomicPos,
        identity: f64,
    ) -> Self {
        Self {
            query_name,
            ref_name,
            q_start,
            q_end,
            r_start,
            r_end,
            identity,
            strand: None,
            color_class: 0,
            first_pos: 0.0,
            second_pos: 0.0,
        }
    }

    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = Some(strand);
        self
    }

    pub fn query_len(&self) -> GenomicPos {
        self.q_end - self.q_start
    }

    pub fn ref_len(&self) -> GenomicPos {
        self.r_end - self.r_start
    }

    /// True when the query and reference intervals are the same interval
    pub fn is_diagonal(&self) -> bool {
        self.q_start == self.r_start && self.q_end == self.r_end
    }

    /// The same alignment seen from the other sequence
    pub fn mirrored(&self) -> Self {
        Self {
            q_start: self.r_start,
            q_end: self.r_end,
            r_start: self.q_start,
            r_end: self.q_end,
            first_pos: self.second_pos,
            second_pos: self.first_pos,
            ..self.clone()
        }
    }

    pub(crate) fn interval_key(&self) -> (GenomicPos, GenomicPos, GenomicPos, GenomicPos) {
        (self.q_start, self.q_end, self.r_start, self.r_end)
    }
}

/// Whether a dataset compares a sequence against itself or two distinct sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ComparisonKind {
    SelfComparison,
    Pairwise,
    /// Self-comparison when every record's query and reference names match
    #[default]
    Auto,
}

impl ComparisonKind {
    /// Resolve `Auto` against a record set; explicit kinds pass through
    pub fn resolve(self, records: &[AlignmentRecord]) -> ComparisonKind {
        match self {
            ComparisonKind::Auto => {
                if records.iter().all(|r| r.query_name == r.ref_name) {
                    ComparisonKind::SelfComparison
                } else {
                    ComparisonKind::Pairwise
                }
            }
            other => other,
        }
    }

    pub fn is_self(self) -> bool {
        matches!(self, ComparisonKind::SelfComparison)
    }
}

impl fmt::Display for ComparisonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonKind::SelfComparison => write!(f, "self"),
            ComparisonKind::Pairwise => write!(f, "pairwise"),
            ComparisonKind::Auto => write!(f, "auto"),
        }
    }
}
