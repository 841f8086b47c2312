use crate::io::report::RichClusterReport;
use crate::io::writers::{JsonWriter, MarkdownWriter, TerminalWriter, TsvWriter};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Markdown,
    Tsv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Terminal => "terminal",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Tsv => "tsv",
        };
        f.write_str(name)
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &RichClusterReport) -> anyhow::Result<()>;
}

/// Writer for `format` that renders into `sink`.
pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    sink: W,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(sink)),
        OutputFormat::Tsv => Box::new(TsvWriter::new(sink)),
    }
}

/// Scores print with three decimals; the diagonal sentinel prints as `-`.
pub fn format_score(score: f64) -> String {
    if score == crate::clustering::SAME_TERM_SENTINEL {
        "-".to_string()
    } else {
        format!("{score:.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.16666), "0.167");
        assert_eq!(format_score(crate::clustering::SAME_TERM_SENTINEL), "-");
    }

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::default(), OutputFormat::Terminal);
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }
}
