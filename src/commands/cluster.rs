//! `richcluster cluster`: file in, report out.

use crate::clustering::{ClusterEngine, ClusteringResult, MergeProgress};
use crate::config::{load_config, ClusterConfig, RichClusterConfig};
use crate::io::{self, create_writer, read_terms, OutputFormat, ReportOptions, RichClusterReport};
use crate::observability::{set_current_input, set_phase, ClusteringPhase};
use anyhow::{Context, Result};
use std::ops::ControlFlow;
use std::path::PathBuf;
use tracing::{info, warn};

/// Command-line values that override the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ClusterOverrides {
    pub distance_metric: Option<String>,
    pub distance_cutoff: Option<f64>,
    pub linkage_method: Option<String>,
    pub linkage_threshold: Option<f64>,
    pub gene_delimiter: Option<String>,
    pub min_membership: Option<f64>,
    pub no_parallel: bool,
    pub no_singletons: bool,
}

impl ClusterOverrides {
    /// Apply on top of the file settings; validation happens afterwards.
    pub fn apply(&self, mut config: RichClusterConfig) -> RichClusterConfig {
        let clustering = &mut config.clustering;
        if let Some(metric) = &self.distance_metric {
            clustering.distance_metric = metric.clone();
        }
        if let Some(cutoff) = self.distance_cutoff {
            clustering.distance_cutoff = cutoff;
        }
        if let Some(method) = &self.linkage_method {
            clustering.linkage_method = method.clone();
        }
        if let Some(threshold) = self.linkage_threshold {
            clustering.linkage_threshold = threshold;
        }
        if self.min_membership.is_some() {
            clustering.min_membership = self.min_membership;
        }
        if self.no_parallel {
            clustering.parallel = false;
        }
        if let Some(delimiter) = &self.gene_delimiter {
            config.input.gene_delimiter = delimiter.clone();
        }
        if self.no_singletons {
            config.output.include_unclustered = false;
        }
        config
    }
}

#[derive(Debug, Clone)]
pub struct ClusterCommand {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub overrides: ClusterOverrides,
    pub max_passes: Option<usize>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub include_matrix: bool,
}

pub fn handle_cluster(command: ClusterCommand) -> Result<()> {
    let _input = set_current_input(&command.input);

    let settings = load_config(command.config.as_deref()).context("Failed to load configuration")?;
    let settings = command.overrides.apply(settings);
    let config = settings
        .cluster_config()
        .context("Invalid clustering settings")?;
    if settings.input.gene_delimiter.is_empty() {
        anyhow::bail!("Gene delimiter must not be empty");
    }

    let terms = {
        let _phase = set_phase(ClusteringPhase::InputLoading);
        read_terms(&command.input, &settings.input.gene_delimiter)
            .with_context(|| format!("Failed to read terms from {}", command.input.display()))?
    };
    if terms.is_empty() {
        warn!(path = %command.input.display(), "Input contains no terms");
    }

    let engine = ClusterEngine::new(terms, config.clone())?;
    let result = engine
        .run_with_control(pass_limit(command.max_passes))
        .context("Clustering failed")?;

    let _phase = set_phase(ClusteringPhase::OutputGeneration);
    let format = command.format.unwrap_or(settings.output.default_format);
    let report = build_report(&result, &config, &settings, command.include_matrix);
    write_report(&report, format, command.output.as_ref())?;

    info!(
        clusters = result.clusters.len(),
        format = %format,
        "Report written"
    );
    Ok(())
}

/// Stop once `limit` passes have run; no limit keeps merging to the fixed point.
fn pass_limit(limit: Option<usize>) -> impl FnMut(&MergeProgress) -> ControlFlow<()> {
    move |progress: &MergeProgress| match limit {
        Some(max) if progress.pass >= max => ControlFlow::Break(()),
        _ => ControlFlow::Continue(()),
    }
}

fn build_report(
    result: &ClusteringResult,
    config: &ClusterConfig,
    settings: &RichClusterConfig,
    include_matrix: bool,
) -> RichClusterReport {
    RichClusterReport::build(
        result,
        config,
        ReportOptions {
            include_unclustered: settings.output.include_unclustered,
            include_matrix,
        },
    )
}

fn write_report(
    report: &RichClusterReport,
    format: OutputFormat,
    output: Option<&PathBuf>,
) -> Result<()> {
    match output {
        Some(path) => {
            // no ANSI escapes in files
            colored::control::set_override(false);
            let mut buffer = Vec::new();
            create_writer(format, &mut buffer).write_report(report)?;
            let rendered = String::from_utf8(buffer).context("Report is not valid UTF-8")?;
            io::write_file(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
        }
        None => {
            let stdout = std::io::stdout();
            create_writer(format, stdout.lock()).write_report(report)?;
        }
    }
    Ok(())
}
