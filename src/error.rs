//! Errors raised by the analyzer pipeline
//!
//! Every variant here is fatal for the run that produced it. Malformed log
//! lines are never errors; the parser skips what it cannot use.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Input log not found: {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to read input log {}: {source}", .path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Raised once the file is open; covers write failures mid-report too
    #[error("Failed to serialize report {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AnalyzerError {
    /// Classify a failure to open the input log
    pub fn from_input_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            AnalyzerError::InputNotFound { path }
        } else {
            AnalyzerError::InputRead { path, source }
        }
    }
}
