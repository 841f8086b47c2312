//! The O(N²) distance pass: fills the matrix and the adjacency list

use super::adjacency::AdjacencyList;
use super::matrix::DistanceMatrix;
use super::metric::{DistanceMetric, Overlap};
use crate::core::{TermIndex, TermSet};
use rayon::prelude::*;
use tracing::{debug, info_span, trace};

/// Score of one upper-triangle pair.
#[derive(Debug, Clone, Copy)]
struct PairScore {
    j: TermIndex,
    score: f64,
    shares_genes: bool,
}

/// Score every term pair and register adjacency for pairs that share at
/// least one gene and score `>= cutoff`.
pub fn compute_distances(
    terms: &TermSet,
    metric: DistanceMetric,
    cutoff: f64,
    parallel: bool,
) -> (DistanceMatrix, AdjacencyList) {
    let n = terms.len();
    let _span = info_span!("compute_distances", terms = n, metric = %metric).entered();

    let rows: Vec<Vec<PairScore>> = if parallel {
        (0..n)
            .into_par_iter()
            .map(|i| score_row(terms, metric, i))
            .collect()
    } else {
        (0..n).map(|i| score_row(terms, metric, i)).collect()
    };

    let mut matrix = DistanceMatrix::new(n);
    let mut adjacency = AdjacencyList::new();

    for (i, row) in rows.into_iter().enumerate() {
        for PairScore {
            j,
            score,
            shares_genes,
        } in row
        {
            matrix.set(i, j, score);
            if shares_genes && score >= cutoff {
                trace!(
                    metric = %metric,
                    a = terms.name(i),
                    b = terms.name(j),
                    score,
                    "adjacent term pair"
                );
                adjacency.add_edge(i, j);
            }
        }
    }

    debug!(
        edges = adjacency.edge_count(),
        connected_terms = adjacency.node_count(),
        "Distance pass complete"
    );

    (matrix, adjacency)
}

fn score_row(terms: &TermSet, metric: DistanceMetric, i: TermIndex) -> Vec<PairScore> {
    let scorer = metric.scorer();
    let total = terms.total_unique_genes();
    let Some(a) = terms.get(i) else {
        return Vec::new();
    };

    terms
        .iter()
        .enumerate()
        .skip(i + 1)
        .map(|(j, b)| {
            let overlap = Overlap::of(&a.genes, &b.genes);
            PairScore {
                j,
                score: scorer(overlap, total),
                shares_genes: overlap.shares_genes(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::matrix::SAME_TERM_SENTINEL;

    fn three_terms() -> TermSet {
        TermSet::from_columns(&["T1", "T2", "T3"], &["g1,g2", "g2,g3", "g4,g5"], ",").unwrap()
    }

    #[test]
    fn test_matrix_is_symmetric_with_sentinel_diagonal() {
        let (matrix, _) = compute_distances(&three_terms(), DistanceMetric::Kappa, 0.0, false);
        for i in 0..3 {
            assert_eq!(matrix.get(i, i), SAME_TERM_SENTINEL);
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert!(matrix.get(0, 1) > 0.0);
        assert_eq!(matrix.get(0, 2), 0.0);
    }

    #[test]
    fn test_pairs_without_shared_genes_are_not_adjacent() {
        let (_, adjacency) = compute_distances(&three_terms(), DistanceMetric::Kappa, 0.0, false);
        assert!(adjacency.has_neighbor(0, 1));
        assert!(adjacency.neighbors(2).is_empty());
    }

    #[test]
    fn test_cutoff_filters_edges() {
        let (_, adjacency) = compute_distances(&three_terms(), DistanceMetric::Kappa, 0.5, false);
        assert!(adjacency.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let terms = three_terms();
        let sequential = compute_distances(&terms, DistanceMetric::Jaccard, 0.1, false);
        let parallel = compute_distances(&terms, DistanceMetric::Jaccard, 0.1, true);
        assert_eq!(sequential, parallel);
    }
}
