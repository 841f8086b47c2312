use serde::{Deserialize, Serialize};

use crate::clustering::{DistanceMetric, LinkageMethod};
use crate::core::{Error, Result};
use crate::io::output::OutputFormat;

/// Validated settings for one clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    pub distance_metric: DistanceMetric,
    /// Minimum pairwise score for two terms to become neighbours
    pub distance_cutoff: f64,
    pub linkage_method: LinkageMethod,
    /// Seeds absorb at `>=` this linkage; clusters merge above it
    pub linkage_threshold: f64,
    /// Drop seeds whose member-pair membership falls below this fraction
    pub min_membership: Option<f64>,
    /// Use rayon for the distance pass and seed growth
    pub parallel: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            distance_metric: DistanceMetric::Kappa,
            distance_cutoff: default_distance_cutoff(),
            linkage_method: LinkageMethod::Average,
            linkage_threshold: default_linkage_threshold(),
            min_membership: None,
            parallel: default_parallel(),
        }
    }
}

impl ClusterConfig {
    /// Check numeric settings; metric and linkage are already typed.
    pub fn validate(&self) -> Result<()> {
        require_finite("distance_cutoff", self.distance_cutoff)?;
        require_finite("linkage_threshold", self.linkage_threshold)?;
        if let Some(membership) = self.min_membership {
            if !(0.0..=1.0).contains(&membership) {
                return Err(Error::invalid_config(
                    "min_membership",
                    format!("expected a fraction between 0 and 1, got {membership}"),
                ));
            }
        }
        Ok(())
    }
}

fn require_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid_config(
            field,
            format!("expected a finite number, got {value}"),
        ))
    }
}

/// Root of `.richcluster.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichClusterConfig {
    #[serde(default)]
    pub clustering: ClusteringSettings,

    #[serde(default)]
    pub input: InputSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

impl RichClusterConfig {
    /// Resolve the clustering table into a validated [`ClusterConfig`].
    pub fn cluster_config(&self) -> Result<ClusterConfig> {
        ClusterConfig::try_from(&self.clustering)
    }
}

/// `[clustering]` table; metric and linkage are kept as names until validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringSettings {
    #[serde(default = "default_distance_metric")]
    pub distance_metric: String,

    #[serde(default = "default_distance_cutoff")]
    pub distance_cutoff: f64,

    #[serde(default = "default_linkage_method")]
    pub linkage_method: String,

    #[serde(default = "default_linkage_threshold")]
    pub linkage_threshold: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_membership: Option<f64>,

    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for ClusteringSettings {
    fn default() -> Self {
        Self::from(&ClusterConfig::default())
    }
}

impl TryFrom<&ClusteringSettings> for ClusterConfig {
    type Error = Error;

    fn try_from(settings: &ClusteringSettings) -> Result<Self> {
        let config = Self {
            distance_metric: settings.distance_metric.parse()?,
            distance_cutoff: settings.distance_cutoff,
            linkage_method: settings.linkage_method.parse()?,
            linkage_threshold: settings.linkage_threshold,
            min_membership: settings.min_membership,
            parallel: settings.parallel,
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<&ClusterConfig> for ClusteringSettings {
    fn from(config: &ClusterConfig) -> Self {
        Self {
            distance_metric: config.distance_metric.to_string(),
            distance_cutoff: config.distance_cutoff,
            linkage_method: config.linkage_method.to_string(),
            linkage_threshold: config.linkage_threshold,
            min_membership: config.min_membership,
            parallel: config.parallel,
        }
    }
}

/// `[input]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    /// Separator between gene ids inside one term's list
    #[serde(default = "default_gene_delimiter")]
    pub gene_delimiter: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            gene_delimiter: default_gene_delimiter(),
        }
    }
}

/// `[output]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub default_format: OutputFormat,

    /// Report terms outside every cluster as singleton rows
    #[serde(default = "default_include_unclustered")]
    pub include_unclustered: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::default(),
            include_unclustered: default_include_unclustered(),
        }
    }
}

pub fn default_distance_metric() -> String {
    DistanceMetric::Kappa.to_string()
}

pub fn default_distance_cutoff() -> f64 {
    0.5
}

pub fn default_linkage_method() -> String {
    LinkageMethod::Average.to_string()
}

pub fn default_linkage_threshold() -> f64 {
    0.5
}

pub fn default_parallel() -> bool {
    true
}

pub fn default_gene_delimiter() -> String {
    ",".to_string()
}

pub fn default_include_unclustered() -> bool {
    true
}
