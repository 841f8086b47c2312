use crate::io::output::{format_score, OutputWriter};
use crate::io::report::{DistanceMatrixReport, RichClusterReport, RunSummary};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use std::io::Write;

/// Matrices wider than this are left to the file formats.
const MAX_TERMINAL_MATRIX: usize = 12;

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &RichClusterReport) -> anyhow::Result<()> {
        self.print_header()?;
        self.print_summary(&report.summary)?;
        self.print_clusters(report)?;
        if let Some(matrix) = &report.distance_matrix {
            self.print_matrix(matrix)?;
        }
        Ok(())
    }
}

impl<W: Write> TerminalWriter<W> {
    fn print_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "RichCluster Report".bold().blue())?;
        writeln!(self.writer, "{}", "==================".blue())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_summary(&mut self, summary: &RunSummary) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Summary:".bold())?;
        writeln!(self.writer, "  Terms: {}", summary.terms)?;
        writeln!(
            self.writer,
            "  Distance: {} (cutoff {})",
            summary.distance_metric.cyan(),
            summary.distance_cutoff
        )?;
        writeln!(
            self.writer,
            "  Linkage: {} (threshold {})",
            summary.linkage_method.cyan(),
            summary.linkage_threshold
        )?;
        if let Some(membership) = summary.min_membership {
            writeln!(self.writer, "  Min membership: {membership}")?;
        }
        writeln!(
            self.writer,
            "  Linked pairs: {}, seeds: {}",
            summary.edges, summary.seeds
        )?;

        let passes = if summary.interrupted {
            format!("{} (stopped early)", summary.merge_passes)
                .yellow()
                .to_string()
        } else {
            summary.merge_passes.to_string()
        };
        writeln!(
            self.writer,
            "  Merge passes: {passes}, merges: {}",
            summary.merges
        )?;
        writeln!(
            self.writer,
            "  Clusters: {} ({} unclustered terms)",
            summary.clusters.to_string().green().bold(),
            summary.unclustered
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_clusters(&mut self, report: &RichClusterReport) -> anyhow::Result<()> {
        if report.clusters.is_empty() {
            writeln!(self.writer, "{}", "No clusters formed.".yellow())?;
            return Ok(());
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Cluster", "Size", "Terms", "Indices"]);
        for row in &report.clusters.rows {
            table.add_row(vec![
                Cell::new(row.cluster),
                Cell::new(row.size),
                Cell::new(&row.term_names),
                Cell::new(&row.term_indices),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn print_matrix(&mut self, matrix: &DistanceMatrixReport) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        if matrix.labels.len() > MAX_TERMINAL_MATRIX {
            writeln!(
                self.writer,
                "Distance matrix has {} terms; use --format tsv or json to export it.",
                matrix.labels.len()
            )?;
            return Ok(());
        }

        let mut table = Table::new();
        let mut header = vec![String::new()];
        header.extend(matrix.labels.iter().cloned());
        table.load_preset(UTF8_FULL).set_header(header);
        for (label, row) in matrix.labels.iter().zip(&matrix.rows) {
            let mut cells = vec![Cell::new(label)];
            cells.extend(row.iter().map(|&score| Cell::new(format_score(score))));
            table.add_row(cells);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}
