//! CLI error types

use chebyshev_detector::DetectorError;
use thiserror::Error;

/// Errors surfaced by the `chebyshev` command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("detector error: {0}")]
    Detector(#[from] DetectorError),

    #[error("line {line}: {source}")]
    Record { line: usize, source: DetectorError },

    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;
