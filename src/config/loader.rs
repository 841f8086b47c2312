use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::core::RichClusterConfig;
use crate::core::{Error, Result, ResultExt};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".richcluster.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Read a config file into a string
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse TOML and check that the clustering table resolves
pub fn parse_and_validate_config(contents: &str) -> Result<RichClusterConfig> {
    let config = toml::from_str::<RichClusterConfig>(contents)?;
    config.cluster_config()?;
    if config.input.gene_delimiter.is_empty() {
        return Err(Error::invalid_config(
            "gene_delimiter",
            "delimiter must not be empty",
        ));
    }
    Ok(config)
}

/// Load and validate a specific config file
pub fn load_config_from_path(path: &Path) -> Result<RichClusterConfig> {
    let contents = read_config_file(path)
        .map_err(Error::from)
        .context(format!("Cannot read config {}", path.display()))?;
    let config = parse_and_validate_config(&contents)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Directory ancestors of `start`, nearest first, at most `max_depth` of them
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Nearest `.richcluster.toml` at or above `start`
pub fn discover_config_path(start: PathBuf) -> Option<PathBuf> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load the explicit config, else the nearest discovered one, else defaults.
///
/// A file that exists but does not parse or validate is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<RichClusterConfig> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            warn!("Failed to get current directory: {}. Using default config.", e);
            return Ok(RichClusterConfig::default());
        }
    };

    match discover_config_path(current) {
        Some(path) => load_config_from_path(&path),
        None => {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            Ok(RichClusterConfig::default())
        }
    }
}

/// Commented default config written by `richcluster init`
pub fn default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&RichClusterConfig::default())?;
    Ok(format!(
        "# richcluster configuration\n\
         #\n\
         # distance_metric: kappa | jaccard\n\
         # linkage_method:  single | complete | average\n\
         # min_membership:  optional fraction (0-1) of seed pairs that must clear distance_cutoff\n\n{body}"
    ))
}
