//! Export tables built from a [`ClusteringResult`].
//!
//! These are the row-per-cluster, row-per-seed and labelled matrix views
//! that the writers render. Term names and indices are comma-joined.

use crate::clustering::ClusteringResult;
use crate::config::ClusterConfig;
use crate::utils::strings;
use serde::Serialize;

const LIST_DELIMITER: &str = ", ";

/// One output cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterRow {
    /// 1-based cluster number
    pub cluster: usize,
    pub size: usize,
    pub term_names: String,
    pub term_indices: String,
    /// `false` for singleton rows added for unclustered terms
    pub seeded: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterReport {
    pub rows: Vec<ClusterRow>,
}

impl ClusterReport {
    /// Rows for the merged clusters only.
    pub fn from_result(result: &ClusteringResult) -> Self {
        let rows = result
            .clusters
            .iter()
            .enumerate()
            .map(|(position, cluster)| {
                row(
                    position + 1,
                    &cluster.members(),
                    &result.term_names,
                    true,
                )
            })
            .collect();
        Self { rows }
    }

    /// Rows for the merged clusters followed by one singleton per unclustered term.
    pub fn with_unclustered(result: &ClusteringResult) -> Self {
        let mut report = Self::from_result(result);
        let start = report.rows.len();
        report.rows.extend(
            result
                .unclustered()
                .into_iter()
                .enumerate()
                .map(|(offset, term)| row(start + offset + 1, &[term], &result.term_names, false)),
        );
        report
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn row(cluster: usize, members: &[usize], names: &[String], seeded: bool) -> ClusterRow {
    ClusterRow {
        cluster,
        size: members.len(),
        term_names: strings::join(members.iter().map(|&term| &names[term]), LIST_DELIMITER),
        term_indices: strings::join(members, LIST_DELIMITER),
        seeded,
    }
}

/// Neighbours of one linked term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedMapRow {
    pub term: String,
    pub term_index: usize,
    pub neighbor_names: String,
    pub neighbor_indices: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedMapReport {
    pub rows: Vec<SeedMapRow>,
}

impl SeedMapReport {
    pub fn from_result(result: &ClusteringResult) -> Self {
        let names = &result.term_names;
        let rows = result
            .adjacency
            .iter()
            .map(|(term, neighbors)| SeedMapRow {
                term: names[term].clone(),
                term_index: term,
                neighbor_names: strings::join(neighbors.iter().map(|&n| &names[n]), LIST_DELIMITER),
                neighbor_indices: strings::join(neighbors, LIST_DELIMITER),
            })
            .collect();
        Self { rows }
    }
}

/// The full score matrix labelled by term name on both axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrixReport {
    pub labels: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl DistanceMatrixReport {
    pub fn from_result(result: &ClusteringResult) -> Self {
        Self {
            labels: result.term_names.clone(),
            rows: result.matrix.rows().map(<[f64]>::to_vec).collect(),
        }
    }
}

/// Run parameters and totals shown alongside the tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub terms: usize,
    pub distance_metric: String,
    pub distance_cutoff: f64,
    pub linkage_method: String,
    pub linkage_threshold: f64,
    pub min_membership: Option<f64>,
    pub edges: usize,
    pub seeds: usize,
    pub clusters: usize,
    pub unclustered: usize,
    pub merge_passes: usize,
    pub merges: usize,
    pub interrupted: bool,
}

impl RunSummary {
    pub fn new(result: &ClusteringResult, config: &ClusterConfig) -> Self {
        Self {
            terms: result.term_names.len(),
            distance_metric: config.distance_metric.to_string(),
            distance_cutoff: config.distance_cutoff,
            linkage_method: config.linkage_method.to_string(),
            linkage_threshold: config.linkage_threshold,
            min_membership: config.min_membership,
            edges: result.adjacency.edge_count(),
            seeds: result.seeds.len(),
            clusters: result.clusters.len(),
            unclustered: result.unclustered().len(),
            merge_passes: result.merge.passes,
            merges: result.merge.merges,
            interrupted: result.merge.interrupted,
        }
    }
}

/// Everything a writer renders for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichClusterReport {
    pub summary: RunSummary,
    pub clusters: ClusterReport,
    pub seed_map: SeedMapReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_matrix: Option<DistanceMatrixReport>,
}

/// Which parts of a run end up in the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub include_unclustered: bool,
    pub include_matrix: bool,
}

impl RichClusterReport {
    pub fn build(result: &ClusteringResult, config: &ClusterConfig, options: ReportOptions) -> Self {
        let clusters = if options.include_unclustered {
            ClusterReport::with_unclustered(result)
        } else {
            ClusterReport::from_result(result)
        };
        Self {
            summary: RunSummary::new(result, config),
            clusters,
            seed_map: SeedMapReport::from_result(result),
            distance_matrix: options
                .include_matrix
                .then(|| DistanceMatrixReport::from_result(result)),
        }
    }
}
