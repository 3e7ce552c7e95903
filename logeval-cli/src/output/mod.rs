//! Output formatting module

use anyhow::Result;
use logeval_core::JobOutcome;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output the result of one (method, dataset) comparison
    fn format_outcome(&mut self, outcome: &JobOutcome) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod csv_table;
pub mod json;
pub mod run_store;
pub mod text;

pub use csv_table::CsvFormatter;
pub use json::JsonFormatter;
pub use run_store::{RunFiles, RunStore};
pub use text::TextFormatter;

use crate::error::CliError;
use clap::ValueEnum;
use std::io::Write;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One status line per comparison
    Text,
    /// JSON array of results
    Json,
    /// CSV table with one column per metric
    Csv,
}

impl OutputFormat {
    /// Parse the `output.default_format` configuration value
    pub fn from_config(name: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(name, true)
            .map_err(|_| CliError::ConfigError(format!("unknown output format '{name}'")).into())
    }

    /// Build a formatter writing to `writer`
    pub fn formatter<W>(self, writer: W, pretty_json: bool) -> Box<dyn OutputFormatter>
    where
        W: Write + Send + Sync + 'static,
    {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer).pretty(pretty_json)),
            OutputFormat::Csv => Box::new(CsvFormatter::new(writer)),
        }
    }
}
