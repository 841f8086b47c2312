//! End-to-end runs of the clustering engine on small term sets.

use pretty_assertions::assert_eq;
use richcluster::io::{ClusterReport, ReportOptions, RichClusterReport};
use richcluster::{
    ClusterConfig, ClusterEngine, ClusteringResult, DistanceMetric, Error, LinkageMethod, TermSet,
    SAME_TERM_SENTINEL,
};

fn run(names: &[&str], genes: &[&str], config: ClusterConfig) -> ClusteringResult {
    let terms = TermSet::from_columns(names, genes, ",").unwrap();
    ClusterEngine::new(terms, config).unwrap().run().unwrap()
}

fn config(
    metric: DistanceMetric,
    cutoff: f64,
    linkage: LinkageMethod,
    threshold: f64,
) -> ClusterConfig {
    ClusterConfig {
        distance_metric: metric,
        distance_cutoff: cutoff,
        linkage_method: linkage,
        linkage_threshold: threshold,
        min_membership: None,
        parallel: false,
    }
}

fn members(result: &ClusteringResult) -> Vec<Vec<usize>> {
    result.clusters.iter().map(|cluster| cluster.members()).collect()
}

#[test]
fn test_disjoint_term_is_left_out_of_core_clusters() {
    let result = run(
        &["T1", "T2", "T3"],
        &["g1,g2", "g2,g3", "g4,g5"],
        config(DistanceMetric::Kappa, 0.0, LinkageMethod::Single, 0.0),
    );

    assert!(result.matrix.get(0, 1) > 0.0);
    assert_eq!(result.matrix.get(0, 2), 0.0);
    assert_eq!(result.adjacency.neighbors(2).len(), 0);

    // the core only emits seed-derived clusters
    assert_eq!(members(&result), vec![vec![0, 1]]);

    // the export boundary adds the leftover term as its own row
    let report = ClusterReport::with_unclustered(&result);
    let names: Vec<&str> = report.rows.iter().map(|row| row.term_names.as_str()).collect();
    assert_eq!(names, vec!["T1, T2", "T3"]);
}

#[test]
fn test_matrix_is_symmetric_with_sentinel_diagonal() {
    let genes = ["a,b,c", "b,c", "c,d,e", "e,f", "a,f", "g"];
    let names = ["A", "B", "C", "D", "E", "F"];
    let result = run(
        &names,
        &genes,
        config(DistanceMetric::Kappa, 0.0, LinkageMethod::Average, 0.0),
    );

    for i in 0..names.len() {
        assert_eq!(result.matrix.get(i, i), SAME_TERM_SENTINEL);
        for j in 0..names.len() {
            assert_eq!(result.matrix.get(i, j), result.matrix.get(j, i));
        }
    }
}

#[test]
fn test_shape_mismatch_fails_before_clustering() {
    let err = TermSet::from_columns(&["T1", "T2"], &["a"], ",").unwrap_err();
    assert!(matches!(
        err,
        Error::InputShapeMismatch {
            terms: 2,
            gene_lists: 1
        }
    ));
}

#[test]
fn test_unknown_names_are_configuration_errors() {
    let metric = "cosine".parse::<DistanceMetric>().unwrap_err();
    assert!(matches!(metric, Error::InvalidConfiguration { ref field, .. } if field == "distance_metric"));

    let linkage = "ward".parse::<LinkageMethod>().unwrap_err();
    assert!(matches!(linkage, Error::InvalidConfiguration { ref field, .. } if field == "linkage_method"));
}

#[test]
fn test_two_separate_families() {
    let names = ["R1", "R2", "R3", "S1", "S2", "S3"];
    let genes = [
        "r1,r2,r3,r4",
        "r2,r3,r4,r5",
        "r1,r3,r4,r5",
        "s1,s2,s3",
        "s2,s3,s4",
        "s1,s3,s4",
    ];
    let result = run(
        &names,
        &genes,
        config(DistanceMetric::Jaccard, 0.3, LinkageMethod::Average, 0.3),
    );

    assert_eq!(members(&result), vec![vec![0, 1, 2], vec![3, 4, 5]]);
    assert!(result.unclustered().is_empty());
    assert!(!result.merge.interrupted);
}

#[test]
fn test_repeated_runs_are_identical() {
    let names = ["A", "B", "C", "D", "E"];
    let genes = ["a,b,c", "a,b,d", "b,c,d", "d,e", "e,f"];
    let first = run(
        &names,
        &genes,
        config(DistanceMetric::Kappa, 0.0, LinkageMethod::Complete, 0.0),
    );
    for _ in 0..5 {
        let again = run(
            &names,
            &genes,
            config(DistanceMetric::Kappa, 0.0, LinkageMethod::Complete, 0.0),
        );
        assert_eq!(again.seeds, first.seeds);
        assert_eq!(again.clusters, first.clusters);
    }
}

#[test]
fn test_duplicate_names_stay_distinct_terms() {
    let result = run(
        &["dup", "dup"],
        &["a,b", "a,b"],
        config(DistanceMetric::Jaccard, 0.5, LinkageMethod::Single, 0.5),
    );
    assert_eq!(result.term_names, vec!["dup", "dup"]);
    assert_eq!(members(&result), vec![vec![0, 1]]);
}

#[test]
fn test_report_bundle_carries_totals() {
    let config = config(DistanceMetric::Kappa, 0.0, LinkageMethod::Single, 0.0);
    let result = run(&["T1", "T2", "T3"], &["g1,g2", "g2,g3", "g4,g5"], config.clone());
    let report = RichClusterReport::build(
        &result,
        &config,
        ReportOptions {
            include_unclustered: false,
            include_matrix: true,
        },
    );

    assert_eq!(report.clusters.len(), 1);
    assert_eq!(report.summary.unclustered, 1);
    assert_eq!(report.seed_map.rows.len(), 2);
    let matrix = report.distance_matrix.unwrap();
    assert_eq!(matrix.labels, vec!["T1", "T2", "T3"]);
}
