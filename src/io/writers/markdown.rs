use crate::io::output::{format_score, OutputWriter};
use crate::io::report::{DistanceMatrixReport, RichClusterReport};
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &RichClusterReport) -> anyhow::Result<()> {
        let writers: Vec<fn(&mut Self, &RichClusterReport) -> anyhow::Result<()>> = vec![
            |w, r| w.write_header(r),
            |w, r| w.write_clusters(r),
            |w, r| w.write_seed_map(r),
            |w, r| match &r.distance_matrix {
                Some(matrix) => w.write_matrix(matrix),
                None => Ok(()),
            },
        ];

        writers.iter().try_for_each(|writer| writer(self, report))
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &RichClusterReport) -> anyhow::Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "# RichCluster Report")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Parameter | Value |")?;
        writeln!(self.writer, "|-----------|-------|")?;
        writeln!(self.writer, "| Terms | {} |", summary.terms)?;
        writeln!(
            self.writer,
            "| Distance | {} (cutoff {}) |",
            summary.distance_metric, summary.distance_cutoff
        )?;
        writeln!(
            self.writer,
            "| Linkage | {} (threshold {}) |",
            summary.linkage_method, summary.linkage_threshold
        )?;
        if let Some(membership) = summary.min_membership {
            writeln!(self.writer, "| Min membership | {membership} |")?;
        }
        writeln!(
            self.writer,
            "| Seeds / clusters | {} / {} |",
            summary.seeds, summary.clusters
        )?;
        writeln!(
            self.writer,
            "| Merge passes | {}{} |",
            summary.merge_passes,
            if summary.interrupted { " (stopped early)" } else { "" }
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_clusters(&mut self, report: &RichClusterReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Clusters")?;
        writeln!(self.writer)?;
        if report.clusters.is_empty() {
            writeln!(self.writer, "_No clusters formed._")?;
            writeln!(self.writer)?;
            return Ok(());
        }
        writeln!(self.writer, "| Cluster | Size | Terms | Indices |")?;
        writeln!(self.writer, "|---------|------|-------|---------|")?;
        for row in &report.clusters.rows {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                row.cluster,
                row.size,
                escape(&row.term_names),
                row.term_indices
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_seed_map(&mut self, report: &RichClusterReport) -> anyhow::Result<()> {
        if report.seed_map.rows.is_empty() {
            return Ok(());
        }
        writeln!(self.writer, "## Seed Map")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Term | Index | Neighbours |")?;
        writeln!(self.writer, "|------|-------|------------|")?;
        for row in &report.seed_map.rows {
            writeln!(
                self.writer,
                "| {} | {} | {} |",
                escape(&row.term),
                row.term_index,
                escape(&row.neighbor_names)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_matrix(&mut self, matrix: &DistanceMatrixReport) -> anyhow::Result<()> {
        writeln!(self.writer, "## Distance Matrix")?;
        writeln!(self.writer)?;
        let labels: Vec<String> = matrix.labels.iter().map(|label| escape(label)).collect();
        writeln!(self.writer, "| | {} |", labels.join(" | "))?;
        writeln!(self.writer, "|---|{}", "---|".repeat(labels.len()))?;
        for (label, row) in labels.iter().zip(&matrix.rows) {
            let cells: Vec<String> = row.iter().map(|&score| format_score(score)).collect();
            writeln!(self.writer, "| {label} | {} |", cells.join(" | "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Term names may contain pipes.
fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}
