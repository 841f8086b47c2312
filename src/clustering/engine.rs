//! Orchestration of one clustering run.
//!
//! [`ClusterEngine`] wires the phases together in order: distance pass,
//! seed growth, optional membership filter, then the merge loop. The
//! matrix and adjacency list are built once and only read afterwards.

use super::adjacency::AdjacencyList;
use super::arena::{Cluster, ClusterArena};
use super::distances::compute_distances;
use super::linkage::Linkage;
use super::matrix::DistanceMatrix;
use super::merge::{merge_clusters_with, MergeProgress, MergeSummary};
use super::seed::{filter_seeds, grow_seeds};
use crate::config::ClusterConfig;
use crate::core::{Result, TermSet};
use crate::observability::{set_merge_progress, set_phase, ClusteringPhase};
use std::ops::ControlFlow;
use std::time::Instant;
use tracing::{debug, info, info_span};

/// Everything one run produces, ready for the export layer.
#[derive(Debug, Clone)]
pub struct ClusteringResult {
    pub term_names: Vec<String>,
    pub matrix: DistanceMatrix,
    pub adjacency: AdjacencyList,
    /// Seeds as grown, before filtering or merging
    pub seeds: Vec<Cluster>,
    /// Final clusters in creation order
    pub clusters: Vec<Cluster>,
    pub merge: MergeSummary,
}

impl ClusteringResult {
    /// Terms that belong to no final cluster, ascending.
    pub fn unclustered(&self) -> Vec<usize> {
        (0..self.term_names.len())
            .filter(|term| !self.clusters.iter().any(|cluster| cluster.contains(*term)))
            .collect()
    }
}

pub struct ClusterEngine {
    terms: TermSet,
    config: ClusterConfig,
}

impl ClusterEngine {
    /// Fails with `InvalidConfiguration` before any work is done.
    pub fn new(terms: TermSet, config: ClusterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { terms, config })
    }

    pub fn terms(&self) -> &TermSet {
        &self.terms
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Run to the merge fixed point.
    pub fn run(&self) -> Result<ClusteringResult> {
        self.run_with_control(|_| ControlFlow::Continue(()))
    }

    /// Run, consulting `control` after every merge pass that merged something.
    ///
    /// Returning `Break` stops merging and keeps the clusters as they stand.
    pub fn run_with_control<F>(&self, mut control: F) -> Result<ClusteringResult>
    where
        F: FnMut(&MergeProgress) -> ControlFlow<()>,
    {
        let config = &self.config;
        let _span = info_span!(
            "cluster_run",
            terms = self.terms.len(),
            metric = %config.distance_metric,
            linkage = %config.linkage_method
        )
        .entered();
        let started = Instant::now();

        let (matrix, adjacency) = {
            let _phase = set_phase(ClusteringPhase::DistanceComputation);
            compute_distances(
                &self.terms,
                config.distance_metric,
                config.distance_cutoff,
                config.parallel,
            )
        };

        let linkage = Linkage::new(&matrix, config.linkage_method, config.linkage_threshold);

        let seeds = {
            let _phase = set_phase(ClusteringPhase::SeedGrowth);
            grow_seeds(&adjacency, &linkage, config.parallel)?
        };

        let kept = match config.min_membership {
            Some(min_membership) => {
                let _phase = set_phase(ClusteringPhase::SeedFiltering);
                filter_seeds(
                    seeds.clone(),
                    &matrix,
                    config.distance_cutoff,
                    min_membership,
                )
            }
            None => seeds.clone(),
        };

        let (clusters, merge) = {
            let _phase = set_phase(ClusteringPhase::ClusterMerging);
            let mut arena: ClusterArena = kept.into_iter().collect();
            let summary = merge_clusters_with(&mut arena, &linkage, |progress| {
                set_merge_progress(progress.pass, progress.active_clusters);
                control(progress)
            })?;
            (arena.into_clusters(), summary)
        };

        debug!(
            edges = adjacency.edge_count(),
            seeds = seeds.len(),
            passes = merge.passes,
            "Clustering phases complete"
        );
        info!(
            clusters = clusters.len(),
            merges = merge.merges,
            interrupted = merge.interrupted,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Clustering finished"
        );

        Ok(ClusteringResult {
            term_names: self.terms.names(),
            matrix,
            adjacency,
            seeds,
            clusters,
            merge,
        })
    }
}
