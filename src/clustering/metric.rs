//! Gene-set similarity scores between two terms

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Scoring function resolved once from a [`DistanceMetric`].
pub type ScoreFn = fn(Overlap, usize) -> f64;

/// Set sizes of one term pair, counted once and shared by every metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub common: usize,
    pub a_len: usize,
    pub b_len: usize,
}

impl Overlap {
    pub fn of(a: &HashSet<String>, b: &HashSet<String>) -> Self {
        Self {
            common: common_count(a, b),
            a_len: a.len(),
            b_len: b.len(),
        }
    }

    pub fn shares_genes(&self) -> bool {
        self.common > 0
    }
}

/// Supported similarity metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Cohen's kappa over gene membership
    Kappa,
    /// Intersection over union
    Jaccard,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 2] = [Self::Kappa, Self::Jaccard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kappa => "kappa",
            Self::Jaccard => "jaccard",
        }
    }

    pub fn scorer(self) -> ScoreFn {
        match self {
            Self::Kappa => kappa_of,
            Self::Jaccard => jaccard_of,
        }
    }

    /// Score two gene sets; `total_genes` is the distinct gene count of the whole input.
    pub fn score(self, a: &HashSet<String>, b: &HashSet<String>, total_genes: usize) -> f64 {
        (self.scorer())(Overlap::of(a, b), total_genes)
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMetric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::invalid_config(
                    "distance_metric",
                    format!("unsupported distance metric `{s}` (expected kappa or jaccard)"),
                )
            })
    }
}

/// Number of genes present in both sets.
pub fn common_count(a: &HashSet<String>, b: &HashSet<String>) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|gene| large.contains(*gene)).count()
}

/// Kappa agreement between two terms' gene memberships.
///
/// Returns `0.0` when the sets share no gene or when chance agreement is
/// exactly one, so no NaN or infinity leaves this function.
pub fn kappa(a: &HashSet<String>, b: &HashSet<String>, total_genes: usize) -> f64 {
    kappa_of(Overlap::of(a, b), total_genes)
}

fn kappa_of(overlap: Overlap, total_genes: usize) -> f64 {
    if !overlap.shares_genes() {
        return 0.0;
    }

    let common = overlap.common as f64;
    let total = total_genes as f64;
    let a_only = overlap.a_len as f64 - common;
    let b_only = overlap.b_len as f64 - common;
    let neither = total - common - a_only - b_only;

    let observed = (common + neither) / total;
    let chance_yes = ((common + a_only) / total) * ((common + b_only) / total);
    let chance_no = ((neither + a_only) / total) * ((neither + b_only) / total);
    let chance = chance_yes + chance_no;

    if chance == 1.0 {
        0.0
    } else {
        (observed - chance) / (1.0 - chance)
    }
}

/// Jaccard index; `0.0` for two empty sets.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>, total_genes: usize) -> f64 {
    jaccard_of(Overlap::of(a, b), total_genes)
}

fn jaccard_of(overlap: Overlap, _total_genes: usize) -> f64 {
    let union = overlap.a_len + overlap.b_len - overlap.common;
    if union == 0 {
        0.0
    } else {
        overlap.common as f64 / union as f64
    }
}
