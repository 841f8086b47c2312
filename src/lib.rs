//! Functional annotation clustering of enrichment terms.
//!
//! Terms are grouped by the similarity of their gene sets: every pair is
//! scored (kappa or jaccard), pairs that share genes and clear a cutoff are
//! linked, a greedy seed is grown around each linked term, and seeds are
//! merged until no pair of clusters links above the threshold.
//!
//! ```no_run
//! use richcluster::{ClusterConfig, ClusterEngine, TermSet};
//!
//! let terms = TermSet::from_columns(&["T1", "T2"], &["g1,g2", "g2,g3"], ",")?;
//! let result = ClusterEngine::new(terms, ClusterConfig::default())?.run()?;
//! for cluster in &result.clusters {
//!     println!("{:?}", cluster.members());
//! }
//! # Ok::<(), richcluster::Error>(())
//! ```

pub mod cli;
pub mod clustering;
pub mod commands;
pub mod config;
pub mod core;
pub mod io;
pub mod observability;
pub mod utils;

pub use crate::core::{Error, Result, Term, TermIndex, TermSet};

pub use crate::clustering::{
    AdjacencyList, Cluster, ClusterArena, ClusterEngine, ClusterId, ClusteringResult,
    DistanceMatrix, DistanceMetric, Linkage, LinkageMethod, MergeProgress, MergeSummary,
    SAME_TERM_SENTINEL,
};

pub use crate::config::{load_config, ClusterConfig, RichClusterConfig};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::io::report::{ClusterReport, DistanceMatrixReport, RichClusterReport, SeedMapReport};
