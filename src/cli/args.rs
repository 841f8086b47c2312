use crate::io::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "richcluster")]
#[command(about = "Cluster enrichment terms by gene-set similarity", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cluster the terms in a TSV or JSON file
    Cluster {
        /// Term file: `name<TAB>genes` lines, or JSON with `terms` and `gene_ids`
        input: PathBuf,

        /// Configuration file (defaults to the nearest .richcluster.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pairwise similarity metric (kappa, jaccard)
        #[arg(long = "distance-metric", visible_alias = "metric")]
        distance_metric: Option<String>,

        /// Minimum pairwise score for two terms to be linked
        #[arg(long = "distance-cutoff", allow_negative_numbers = true)]
        distance_cutoff: Option<f64>,

        /// Linkage between groups (single, complete, average)
        #[arg(long = "linkage-method", visible_alias = "linkage")]
        linkage_method: Option<String>,

        /// Seeds absorb at or above this linkage; clusters merge above it
        #[arg(long = "linkage-threshold", allow_negative_numbers = true)]
        linkage_threshold: Option<f64>,

        /// Separator between gene ids in one term's list
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Drop seeds whose linked-pair fraction is below this value (0-1)
        #[arg(long = "min-membership")]
        min_membership: Option<f64>,

        /// Stop merging after this many passes
        #[arg(long = "max-passes")]
        max_passes: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave unclustered terms out of the cluster table
        #[arg(long = "no-singletons")]
        no_singletons: bool,

        /// Include the full distance matrix in the report
        #[arg(long)]
        matrix: bool,

        /// Disable parallel distance computation and seed growth
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Number of worker threads (0 = all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0", env = "RICHCLUSTER_JOBS")]
        jobs: usize,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        /// -v: Show run summary
        /// -vv: Show per-phase and per-pass details
        /// -vvv: Show every linked pair and seed step
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a default .richcluster.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
