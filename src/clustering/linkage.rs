//! Group-to-group linkage over the distance matrix

use super::arena::Cluster;
use super::matrix::DistanceMatrix;
use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Folds the pairwise scores of two groups into one value; `None` for no pairs.
type Reducer = fn(&mut dyn Iterator<Item = f64>) -> Option<f64>;

/// Supported linkage strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkageMethod {
    /// Minimum pairwise score
    Single,
    /// Maximum pairwise score
    Complete,
    /// Mean pairwise score
    Average,
}

impl LinkageMethod {
    pub const ALL: [LinkageMethod; 3] = [Self::Single, Self::Complete, Self::Average];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Complete => "complete",
            Self::Average => "average",
        }
    }

    fn reducer(self) -> Reducer {
        match self {
            Self::Single => single,
            Self::Complete => complete,
            Self::Average => average,
        }
    }
}

impl fmt::Display for LinkageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkageMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::invalid_config(
                    "linkage_method",
                    format!(
                        "unsupported linkage method `{s}` (expected single, complete or average)"
                    ),
                )
            })
    }
}

fn single(scores: &mut dyn Iterator<Item = f64>) -> Option<f64> {
    scores.reduce(f64::min)
}

fn complete(scores: &mut dyn Iterator<Item = f64>) -> Option<f64> {
    scores.reduce(f64::max)
}

fn average(scores: &mut dyn Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = scores.fold((0.0, 0usize), |(sum, count), score| (sum + score, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// A linkage method bound to one run's matrix and threshold.
#[derive(Clone, Copy)]
pub struct Linkage<'a> {
    matrix: &'a DistanceMatrix,
    method: LinkageMethod,
    threshold: f64,
    reduce: Reducer,
}

impl<'a> Linkage<'a> {
    pub fn new(matrix: &'a DistanceMatrix, method: LinkageMethod, threshold: f64) -> Self {
        Self {
            matrix,
            method,
            threshold,
            reduce: method.reducer(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Linkage between two groups over every cross pair of distinct terms.
    ///
    /// Groups may overlap; pairs of a term with itself are skipped. When no
    /// pair remains the call fails with [`Error::EmptyClusterLinkage`].
    pub fn score(&self, a: &Cluster, b: &Cluster) -> Result<f64> {
        let matrix = self.matrix;
        let mut pairs = a.iter().flat_map(move |i| {
            b.iter()
                .filter(move |&j| j != i)
                .map(move |j| matrix.get(i, j))
        });
        (self.reduce)(&mut pairs).ok_or(Error::EmptyClusterLinkage)
    }
}

impl fmt::Debug for Linkage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Linkage")
            .field("method", &self.method)
            .field("threshold", &self.threshold)
            .field("terms", &self.matrix.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DistanceMatrix {
        let mut matrix = DistanceMatrix::new(4);
        matrix.set(0, 1, 0.9);
        matrix.set(0, 2, 0.2);
        matrix.set(0, 3, 0.5);
        matrix.set(1, 2, 0.4);
        matrix.set(1, 3, 0.6);
        matrix.set(2, 3, 0.8);
        matrix
    }

    fn group(items: &[usize]) -> Cluster {
        items.iter().copied().collect()
    }

    #[test]
    fn test_single_takes_minimum() {
        let m = matrix();
        let linkage = Linkage::new(&m, LinkageMethod::Single, 0.5);
        assert_eq!(linkage.score(&group(&[0, 1]), &group(&[2, 3])).unwrap(), 0.2);
    }

    #[test]
    fn test_complete_takes_maximum() {
        let m = matrix();
        let linkage = Linkage::new(&m, LinkageMethod::Complete, 0.5);
        assert_eq!(linkage.score(&group(&[0, 1]), &group(&[2, 3])).unwrap(), 0.6);
    }

    #[test]
    fn test_average_takes_mean() {
        let m = matrix();
        let linkage = Linkage::new(&m, LinkageMethod::Average, 0.5);
        let score = linkage.score(&group(&[0, 1]), &group(&[2, 3])).unwrap();
        assert!((score - (0.2 + 0.5 + 0.4 + 0.6) / 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_same_term_pairs_are_skipped() {
        let m = matrix();
        let linkage = Linkage::new(&m, LinkageMethod::Single, 0.5);
        // (1, 1) would hit the diagonal sentinel
        assert_eq!(linkage.score(&group(&[0, 1]), &group(&[1])).unwrap(), 0.9);
    }

    #[test]
    fn test_empty_group_is_an_error() {
        let m = matrix();
        for method in LinkageMethod::ALL {
            let linkage = Linkage::new(&m, method, 0.5);
            assert!(matches!(
                linkage.score(&group(&[]), &group(&[1])),
                Err(Error::EmptyClusterLinkage)
            ));
            assert!(matches!(
                linkage.score(&group(&[2]), &group(&[2])),
                Err(Error::EmptyClusterLinkage)
            ));
        }
    }

    #[test]
    fn test_linkage_is_symmetric() {
        let m = matrix();
        for method in LinkageMethod::ALL {
            let linkage = Linkage::new(&m, method, 0.5);
            let ab = linkage.score(&group(&[0]), &group(&[2, 3])).unwrap();
            let ba = linkage.score(&group(&[2, 3]), &group(&[0])).unwrap();
            assert!((ab - ba).abs() < 1e-12);
        }
    }

    #[test]
    fn test_parse_linkage_names() {
        assert_eq!("AVERAGE".parse::<LinkageMethod>().unwrap(), LinkageMethod::Average);
        assert!(matches!(
            "ward".parse::<LinkageMethod>(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
