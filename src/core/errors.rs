//! Shared error types for the clustering pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for richcluster operations
#[derive(Debug, Error)]
pub enum Error {
    /// Term names and gene-id lists have different lengths
    #[error("Input shape mismatch: {terms} term names but {gene_lists} gene-id lists")]
    InputShapeMismatch { terms: usize, gene_lists: usize },

    /// Unknown metric/linkage name or an unusable numeric setting
    #[error("Invalid configuration for `{field}`: {message}")]
    InvalidConfiguration { field: String, message: String },

    /// Linkage requested between groups that share no comparable term pair
    #[error("Linkage requested between empty clusters")]
    EmptyClusterLinkage,

    /// Input file could not be interpreted
    #[error("Input error in {path}: {message}")]
    Input { path: PathBuf, message: String },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML parse errors
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML render errors
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// Create an invalid configuration error for a named field
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an input error with path context
    pub fn input(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
