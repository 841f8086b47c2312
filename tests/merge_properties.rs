//! Property tests for the distance pass, seed growth and merge loop.

use proptest::prelude::*;
use richcluster::clustering::{
    compute_distances, grow_seed, grow_seeds, merge_clusters, Cluster, ClusterArena, Linkage,
};
use richcluster::{DistanceMetric, LinkageMethod, Term, TermSet};
use std::collections::HashSet;

/// Up to 12 terms drawn from a 10-gene universe so overlaps are common.
fn term_set() -> impl Strategy<Value = TermSet> {
    prop::collection::vec(prop::collection::hash_set(0u8..10, 0..6), 1..12).prop_map(|sets| {
        let terms = sets
            .into_iter()
            .enumerate()
            .map(|(i, genes)| Term {
                name: format!("T{i}"),
                genes: genes.into_iter().map(|g| format!("g{g}")).collect::<HashSet<_>>(),
            })
            .collect();
        TermSet::from_terms(terms)
    })
}

fn metric() -> impl Strategy<Value = DistanceMetric> {
    prop::sample::select(DistanceMetric::ALL.to_vec())
}

fn linkage_method() -> impl Strategy<Value = LinkageMethod> {
    prop::sample::select(LinkageMethod::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_adjacency_is_symmetric(terms in term_set(), metric in metric(), cutoff in -0.5f64..0.9) {
        let (matrix, adjacency) = compute_distances(&terms, metric, cutoff, false);
        for (node, neighbors) in adjacency.iter() {
            for &neighbor in neighbors {
                prop_assert!(adjacency.has_neighbor(neighbor, node));
                prop_assert!(matrix.get(node, neighbor) >= cutoff);
            }
        }
    }

    #[test]
    fn prop_scores_are_finite(terms in term_set(), metric in metric()) {
        let (matrix, _) = compute_distances(&terms, metric, 0.0, false);
        for i in 0..terms.len() {
            for j in 0..terms.len() {
                let score = matrix.get(i, j);
                prop_assert!(score.is_finite());
                if i != j {
                    prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&score));
                }
            }
        }
    }

    #[test]
    fn prop_seed_growth_is_deterministic(
        terms in term_set(),
        method in linkage_method(),
        threshold in -0.2f64..0.8,
    ) {
        let (matrix, adjacency) = compute_distances(&terms, DistanceMetric::Kappa, 0.0, false);
        let linkage = Linkage::new(&matrix, method, threshold);
        for (root, neighbors) in adjacency.iter() {
            let first = grow_seed(root, neighbors, &linkage).unwrap();
            let second = grow_seed(root, neighbors, &linkage).unwrap();
            prop_assert!(first.contains(root));
            prop_assert_eq!(first, second);
        }
        let sequential = grow_seeds(&adjacency, &linkage, false).unwrap();
        let parallel = grow_seeds(&adjacency, &linkage, true).unwrap();
        prop_assert_eq!(sequential, parallel);
    }

    #[test]
    fn prop_merge_terminates_and_is_idempotent(
        terms in term_set(),
        method in linkage_method(),
        threshold in -0.2f64..0.8,
    ) {
        let (matrix, adjacency) = compute_distances(&terms, DistanceMetric::Kappa, 0.0, false);
        let linkage = Linkage::new(&matrix, method, threshold);
        let seeds = grow_seeds(&adjacency, &linkage, false).unwrap();
        let seed_count = seeds.len();

        let mut arena: ClusterArena = seeds.into_iter().collect();
        let summary = merge_clusters(&mut arena, &linkage).unwrap();
        // each merge retires one cluster, and the last pass merges nothing
        prop_assert_eq!(arena.len() + summary.merges, seed_count);
        prop_assert!(summary.passes <= seed_count.max(1));

        let fixed_point: Vec<Cluster> = arena.iter().map(|(_, c)| c.clone()).collect();
        let mut again: ClusterArena = fixed_point.clone().into_iter().collect();
        let rerun = merge_clusters(&mut again, &linkage).unwrap();
        prop_assert_eq!(rerun.merges, 0);
        prop_assert_eq!(rerun.passes, 1);
        prop_assert_eq!(again.into_clusters(), fixed_point);
    }
}
