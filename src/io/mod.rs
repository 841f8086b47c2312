pub mod input;
pub mod output;
pub mod report;
pub mod writers;

pub use input::{read_terms, InputFormat};
pub use output::{create_writer, OutputFormat, OutputWriter};
pub use report::{
    ClusterReport, ClusterRow, DistanceMatrixReport, ReportOptions, RichClusterReport, RunSummary,
    SeedMapReport, SeedMapRow,
};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
