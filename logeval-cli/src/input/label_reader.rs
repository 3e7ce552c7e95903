//! Reading cluster labels from structured CSV files

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Extracts one label column from a structured log CSV
#[derive(Debug, Clone)]
pub struct LabelReader {
    candidates: Vec<String>,
}

impl LabelReader {
    /// Create a reader trying `candidates` in order
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    /// Candidate column names
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Read labels from a CSV file
    pub fn read_path(&self, path: &Path) -> Result<Vec<String>> {
        if !path.is_file() {
            return Err(CliError::FileNotFound(path.display().to_string()).into());
        }
        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        self.read_from(file, &path.display().to_string())
            .with_context(|| format!("Failed to read labels from: {}", path.display()))
    }

    /// Read labels from any CSV source; `source` names it in errors
    ///
    /// Empty cells, and rows too short to reach the label column, yield the
    /// empty-string "unlabeled" sentinel.
    pub fn read_from<R: Read>(&self, reader: R, source: &str) -> Result<Vec<String>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let column = self
            .candidates
            .iter()
            .find_map(|name| headers.iter().position(|h| h.trim() == name.as_str()))
            .ok_or_else(|| CliError::MissingLabelColumn {
                path: source.to_string(),
                candidates: self.candidates.clone(),
            })?;
        log::trace!("{source}: using column '{}'", &headers[column]);

        let mut labels = Vec::new();
        for record in rdr.records() {
            let record = record?;
            labels.push(record.get(column).unwrap_or("").to_string());
        }
        Ok(labels)
    }
}

impl Default for LabelReader {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_LABEL_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        )
    }
}
