//! Symmetric N×N score table

use crate::core::TermIndex;
use serde::Serialize;

/// Value stored on the diagonal; outside every metric's range.
pub const SAME_TERM_SENTINEL: f64 = -99.0;

/// Pairwise scores stored flattened in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl DistanceMatrix {
    /// A matrix with the sentinel on the diagonal and zero elsewhere.
    pub fn new(size: usize) -> Self {
        let mut scores = vec![0.0; size * size];
        for i in 0..size {
            scores[i * size + i] = SAME_TERM_SENTINEL;
        }
        Self { size, scores }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn contains(&self, i: TermIndex, j: TermIndex) -> bool {
        i < self.size && j < self.size
    }

    fn offset(&self, i: TermIndex, j: TermIndex) -> usize {
        assert!(
            self.contains(i, j),
            "term pair ({i}, {j}) out of range for {} terms",
            self.size
        );
        i * self.size + j
    }

    /// Record `value` for both `(i, j)` and `(j, i)`. Writes to the diagonal are ignored.
    pub fn set(&mut self, i: TermIndex, j: TermIndex, value: f64) {
        if i == j {
            return;
        }
        let forward = self.offset(i, j);
        let backward = self.offset(j, i);
        self.scores[forward] = value;
        self.scores[backward] = value;
    }

    /// Score of `(i, j)`. Panics when either index is not a term of this matrix.
    pub fn get(&self, i: TermIndex, j: TermIndex) -> f64 {
        let offset = self.offset(i, j);
        if i == j {
            return SAME_TERM_SENTINEL;
        }
        self.scores[offset]
    }

    /// `None` for pairs outside the matrix.
    pub fn try_get(&self, i: TermIndex, j: TermIndex) -> Option<f64> {
        self.contains(i, j).then(|| self.get(i, j))
    }

    pub fn row(&self, i: TermIndex) -> &[f64] {
        let start = self.offset(i, 0);
        &self.scores[start..start + self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.scores.chunks(self.size.max(1)).take(self.size)
    }
}
