//! Term clustering: pairwise scoring, seed growth and iterative merging.
//!
//! The pipeline for one run:
//!
//! 1. [`compute_distances`] scores every term pair into a [`DistanceMatrix`]
//!    and links pairs that share genes and clear the cutoff in an
//!    [`AdjacencyList`].
//! 2. [`grow_seeds`] grows one greedy [`Cluster`] per linked term using a
//!    [`Linkage`] over the matrix.
//! 3. [`merge_clusters`] merges seeds held in a [`ClusterArena`] until no
//!    pair links above the threshold.
//!
//! [`ClusterEngine`] runs all three with a validated configuration.

pub mod adjacency;
pub mod arena;
pub mod distances;
pub mod engine;
pub mod linkage;
pub mod matrix;
pub mod merge;
pub mod metric;
pub mod seed;

pub use adjacency::AdjacencyList;
pub use arena::{Cluster, ClusterArena, ClusterId};
pub use distances::compute_distances;
pub use engine::{ClusterEngine, ClusteringResult};
pub use linkage::{Linkage, LinkageMethod};
pub use matrix::{DistanceMatrix, SAME_TERM_SENTINEL};
pub use merge::{merge_clusters, merge_clusters_with, MergeProgress, MergeSummary};
pub use metric::{jaccard, kappa, DistanceMetric};
pub use seed::{filter_seeds, grow_seed, grow_seeds, membership};
