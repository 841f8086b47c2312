//! Term/gene input readers.
//!
//! Two layouts are accepted:
//!
//! - TSV, one term per line: `name<TAB>gene-list`. Blank lines and lines
//!   starting with `#` are skipped.
//! - JSON with parallel columns: `{ "terms": [...], "gene_ids": [...] }`.
//!
//! Gene lists are split on the configured delimiter in both layouts.

use crate::core::{Error, Result, TermSet};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// On-disk layout of a term file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Tsv,
    Json,
}

impl InputFormat {
    /// `.json` files are JSON; everything else is read as TSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Tsv,
        }
    }
}

/// Parallel name and gene-list columns.
#[derive(Debug, Deserialize)]
struct TermColumns {
    terms: Vec<String>,
    gene_ids: Vec<String>,
}

/// Read a term file, choosing the layout from its extension.
pub fn read_terms(path: &Path, delimiter: &str) -> Result<TermSet> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::input(path, format!("cannot read file: {e}")))?;
    let terms = match InputFormat::from_path(path) {
        InputFormat::Tsv => parse_tsv(&content, path, delimiter)?,
        InputFormat::Json => parse_json(&content, path, delimiter)?,
    };
    debug!(
        path = %path.display(),
        terms = terms.len(),
        genes = terms.total_unique_genes(),
        "Loaded terms"
    );
    Ok(terms)
}

pub fn parse_tsv(content: &str, path: &Path, delimiter: &str) -> Result<TermSet> {
    let mut names = Vec::new();
    let mut gene_ids = Vec::new();

    for (line_number, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let Some((name, genes)) = line.split_once('\t') else {
            return Err(Error::input(
                path,
                format!(
                    "line {}: expected `name<TAB>gene-list`, found no tab",
                    line_number + 1
                ),
            ));
        };
        names.push(name.trim().to_string());
        gene_ids.push(genes.to_string());
    }

    TermSet::from_columns(&names, &gene_ids, delimiter)
}

pub fn parse_json(content: &str, path: &Path, delimiter: &str) -> Result<TermSet> {
    let columns: TermColumns = serde_json::from_str(content)
        .map_err(|e| Error::input(path, format!("invalid term JSON: {e}")))?;
    TermSet::from_columns(&columns.terms, &columns.gene_ids, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_tsv_skips_comments_and_blanks() {
        let content = indoc! {"
            # term\tgenes
            GO:0001\tg1, g2

            GO:0002\tg2,g3,
        "};
        let terms = parse_tsv(content, Path::new("terms.tsv"), ",").unwrap();
        assert_eq!(terms.names(), vec!["GO:0001", "GO:0002"]);
        assert_eq!(terms.total_unique_genes(), 3);
        assert!(terms.get(0).unwrap().genes.contains("g2"));
    }

    #[test]
    fn test_parse_tsv_line_without_tab() {
        let err = parse_tsv("A\tg1\nB g2\n", Path::new("terms.tsv"), ",").unwrap_err();
        match err {
            Error::Input { message, .. } => assert!(message.starts_with("line 2:")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_tsv_empty_gene_list_is_legal() {
        let terms = parse_tsv("A\t\n", Path::new("terms.tsv"), ",").unwrap();
        assert_eq!(terms.len(), 1);
        assert!(terms.get(0).unwrap().genes.is_empty());
    }

    #[test]
    fn test_parse_json_columns() {
        let content = r#"{"terms": ["T1", "T2"], "gene_ids": ["a;b", "b;c"]}"#;
        let terms = parse_json(content, Path::new("terms.json"), ";").unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(terms.total_unique_genes(), 3);
    }

    #[test]
    fn test_parse_json_shape_mismatch() {
        let content = r#"{"terms": ["T1", "T2"], "gene_ids": ["a"]}"#;
        let err = parse_json(content, Path::new("terms.json"), ",").unwrap_err();
        assert!(matches!(
            err,
            Error::InputShapeMismatch {
                terms: 2,
                gene_lists: 1
            }
        ));
    }

    #[test]
    fn test_read_terms_by_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"terms": ["T1"], "gene_ids": ["a,b"]}}"#).unwrap();
        let terms = read_terms(file.path(), ",").unwrap();
        assert_eq!(terms.names(), vec!["T1"]);

        let mut tsv = NamedTempFile::new().unwrap();
        writeln!(tsv, "T1\ta,b").unwrap();
        assert_eq!(read_terms(tsv.path(), ",").unwrap().len(), 1);
    }

    #[test]
    fn test_read_terms_missing_file() {
        let err = read_terms(Path::new("/nonexistent/terms.tsv"), ",").unwrap_err();
        assert!(matches!(err, Error::Input { .. }));
    }

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("x.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("x.txt")), InputFormat::Tsv);
    }
}
