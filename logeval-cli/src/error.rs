//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// None of the accepted label columns is present
    MissingLabelColumn {
        /// File that was inspected
        path: String,
        /// Column names that were tried
        candidates: Vec<String>,
    },
    /// No structured ground-truth CSV in a dataset directory
    GroundTruthNotFound(String),
    /// No structured prediction CSV in a method output directory
    PredictionNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::MissingLabelColumn { path, candidates } => write!(
                f,
                "No label column found in {path} (tried: {})",
                candidates.join(", ")
            ),
            CliError::GroundTruthNotFound(dir) => {
                write!(f, "No structured ground-truth CSV in {dir}")
            }
            CliError::PredictionNotFound(dir) => {
                write!(f, "No structured prediction CSV in {dir}")
            }
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
