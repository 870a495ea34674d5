//! Error taxonomy for the analyzer
//!
//! Only project-root-level failures abort an analysis. Per-file parse
//! problems are recorded as `SkippedFile` entries in the report and never
//! raised; imports that resolve outside the project are silently dropped.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Fatal: the project root cannot be read at all.
    #[error("project root is not readable: {path}")]
    UnreadableProjectRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Surfaced to the caller; the in-memory report stays valid.
    #[error("failed to write {format} export to {path}")]
    Export {
        format: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("failed to read configuration file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
