//! Seed growth: one greedy cluster per connected term

use super::adjacency::AdjacencyList;
use super::arena::Cluster;
use super::linkage::Linkage;
use super::matrix::DistanceMatrix;
use crate::core::{Result, TermIndex};
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::{debug, info_span, trace};

/// Grow the seed rooted at `root`.
///
/// Starting from `{root}`, repeatedly add the neighbour with the greatest
/// linkage to the current cluster while that linkage is `>= threshold`.
/// Ties go to the lowest term index because neighbours are scanned in
/// ascending order and only a strictly greater score replaces the best.
pub fn grow_seed(
    root: TermIndex,
    neighbors: &BTreeSet<TermIndex>,
    linkage: &Linkage<'_>,
) -> Result<Cluster> {
    let mut cluster = Cluster::singleton(root);

    loop {
        let mut best: Option<(TermIndex, f64)> = None;
        for &candidate in neighbors {
            if cluster.contains(candidate) {
                continue;
            }
            let score = linkage.score(&cluster, &Cluster::singleton(candidate))?;
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }

        match best {
            Some((candidate, score)) if score >= linkage.threshold() => {
                trace!(root, candidate, score, "seed absorbs neighbour");
                cluster.insert(candidate);
            }
            _ => break,
        }
    }

    Ok(cluster)
}

/// Grow one seed per term that has neighbours, in ascending root order.
pub fn grow_seeds(
    adjacency: &AdjacencyList,
    linkage: &Linkage<'_>,
    parallel: bool,
) -> Result<Vec<Cluster>> {
    let _span = info_span!("grow_seeds", roots = adjacency.node_count()).entered();
    let roots: Vec<(TermIndex, &BTreeSet<TermIndex>)> = adjacency.iter().collect();

    let seeds = if parallel {
        roots
            .par_iter()
            .map(|(root, neighbors)| grow_seed(*root, neighbors, linkage))
            .collect::<Result<Vec<_>>>()?
    } else {
        roots
            .iter()
            .map(|(root, neighbors)| grow_seed(*root, neighbors, linkage))
            .collect::<Result<Vec<_>>>()?
    };

    debug!(seeds = seeds.len(), "Seed growth complete");
    Ok(seeds)
}

/// Fraction of a group's unordered member pairs scoring `>= cutoff`.
///
/// A group with fewer than two members has no pairs and scores `0.0`.
pub fn membership(cluster: &Cluster, matrix: &DistanceMatrix, cutoff: f64) -> f64 {
    let members = cluster.members();
    let mut total = 0usize;
    let mut close = 0usize;
    for (position, &a) in members.iter().enumerate() {
        for &b in &members[position + 1..] {
            total += 1;
            if matrix.get(a, b) >= cutoff {
                close += 1;
            }
        }
    }

    if total == 0 {
        0.0
    } else {
        close as f64 / total as f64
    }
}

/// Drop seeds whose membership is below `min_membership`.
pub fn filter_seeds(
    seeds: Vec<Cluster>,
    matrix: &DistanceMatrix,
    distance_cutoff: f64,
    min_membership: f64,
) -> Vec<Cluster> {
    let before = seeds.len();
    let kept: Vec<Cluster> = seeds
        .into_iter()
        .filter(|seed| membership(seed, matrix, distance_cutoff) >= min_membership)
        .collect();
    debug!(
        before,
        after = kept.len(),
        min_membership,
        "Seed membership filter applied"
    );
    kept
}
