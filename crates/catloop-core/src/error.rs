//! Error types for catalog and configuration loading.
//!
//! The per-frame path never fails; only loading inputs can.

use thiserror::Error;

/// Failure to read or parse a catalog document as a whole.
///
/// Individual bad records are not errors; they are reported as
/// [`crate::catalog::CatalogIssue`]s and skipped.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to load or validate a session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
