//! Input data model shared by every clustering phase

pub mod errors;

pub use errors::{Error, Result, ResultExt};

use crate::utils::strings;
use serde::Serialize;
use std::collections::HashSet;

/// Stable position of a term in the input, `0..N`.
pub type TermIndex = usize;

/// An annotation term and the genes annotated to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    pub name: String,
    pub genes: HashSet<String>,
}

/// The immutable term list for one clustering run.
///
/// Duplicate names are legal and stay distinct terms.
#[derive(Debug, Clone, Default)]
pub struct TermSet {
    terms: Vec<Term>,
    total_unique_genes: usize,
}

impl TermSet {
    /// Build from parallel columns of term names and delimited gene-id lists.
    ///
    /// Fails with `InvalidConfiguration` on an empty delimiter.
    pub fn from_columns<N, G>(names: &[N], gene_ids: &[G], delimiter: &str) -> Result<Self>
    where
        N: AsRef<str>,
        G: AsRef<str>,
    {
        if names.len() != gene_ids.len() {
            return Err(Error::InputShapeMismatch {
                terms: names.len(),
                gene_lists: gene_ids.len(),
            });
        }
        if delimiter.is_empty() {
            return Err(Error::invalid_config(
                "gene_delimiter",
                "gene delimiter must not be empty",
            ));
        }

        let total_unique_genes = strings::count_unique_elements(gene_ids, delimiter);
        let terms = names
            .iter()
            .zip(gene_ids)
            .map(|(name, genes)| Term {
                name: name.as_ref().to_string(),
                genes: strings::split_to_set(genes.as_ref(), delimiter),
            })
            .collect();

        Ok(Self {
            terms,
            total_unique_genes,
        })
    }

    /// Build from already-tokenized terms.
    pub fn from_terms(terms: Vec<Term>) -> Self {
        let total_unique_genes = terms
            .iter()
            .flat_map(|term| term.genes.iter())
            .collect::<HashSet<_>>()
            .len();
        Self {
            terms,
            total_unique_genes,
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, index: TermIndex) -> Option<&Term> {
        self.terms.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Term> {
        self.terms.iter()
    }

    /// Distinct gene identifiers across all terms.
    pub fn total_unique_genes(&self) -> usize {
        self.total_unique_genes
    }

    pub fn names(&self) -> Vec<String> {
        self.terms.iter().map(|term| term.name.clone()).collect()
    }

    /// Name of the term at `index`, or an empty string when out of range.
    pub fn name(&self, index: TermIndex) -> &str {
        self.terms
            .get(index)
            .map(|term| term.name.as_str())
            .unwrap_or_default()
    }
}
