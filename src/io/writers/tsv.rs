//! Tab-separated cluster table, optionally followed by the score matrix

use crate::io::output::{format_score, OutputWriter};
use crate::io::report::{DistanceMatrixReport, RichClusterReport};
use std::borrow::Cow;
use std::io::Write;

/// Escape the characters that would split a field or a row.
fn escape_field(field: &str) -> Cow<'_, str> {
    if !field.contains(['\\', '\t', '\n', '\r']) {
        return Cow::Borrowed(field);
    }
    let mut escaped = String::with_capacity(field.len() + 2);
    for ch in field.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

pub struct TsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> TsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_clusters(&mut self, report: &RichClusterReport) -> anyhow::Result<()> {
        writeln!(self.writer, "cluster\tsize\tterm_names\tterm_indices")?;
        for row in &report.clusters.rows {
            writeln!(
                self.writer,
                "{}\t{}\t{}\t{}",
                row.cluster,
                row.size,
                escape_field(&row.term_names),
                row.term_indices
            )?;
        }
        Ok(())
    }

    fn write_matrix(&mut self, matrix: &DistanceMatrixReport) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        let labels: Vec<Cow<'_, str>> = matrix.labels.iter().map(|l| escape_field(l)).collect();
        writeln!(self.writer, "term\t{}", labels.join("\t"))?;
        for (label, row) in labels.iter().zip(&matrix.rows) {
            let cells: Vec<String> = row.iter().map(|&score| format_score(score)).collect();
            writeln!(self.writer, "{label}\t{}", cells.join("\t"))?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TsvWriter<W> {
    fn write_report(&mut self, report: &RichClusterReport) -> anyhow::Result<()> {
        self.write_clusters(report)?;
        if let Some(matrix) = &report.distance_matrix {
            self.write_matrix(matrix)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("GO:0001 binding"), "GO:0001 binding");
        assert_eq!(escape_field("a\tb\nc\r"), "a\\tb\\nc\\r");
        assert_eq!(escape_field("a\\t"), "a\\\\t");
    }
}
