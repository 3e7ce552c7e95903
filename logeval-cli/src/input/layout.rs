//! Benchmark directory layout
//!
//! Ground truth lives in `<datasets>/<dataset>/*_structured[_corrected].csv`,
//! parser output in `<predictions>/<method>/<dataset>/*_structured.csv`.

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::{glob, Pattern};
use std::fs;
use std::path::{Path, PathBuf};

const CORRECTED_SUFFIX: &str = "_structured_corrected.csv";
const STRUCTURED_SUFFIX: &str = "_structured.csv";

/// Sorted names of the immediate subdirectories of `root`
pub fn list_subdirs(root: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(root)
        .with_context(|| format!("Failed to list directory: {}", root.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list directory: {}", root.display()))?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Pick the ground-truth CSV of a dataset
///
/// Corrected files win over plain structured files; ties break by name.
pub fn find_ground_truth(dataset_dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(dataset_dir)
        .with_context(|| format!("Failed to list directory: {}", dataset_dir.display()))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_file() && (name.ends_with(CORRECTED_SUFFIX) || name.ends_with(STRUCTURED_SUFFIX))
        {
            candidates.push((!name.contains("corrected"), name.to_string(), path.clone()));
        }
    }

    candidates.sort();
    candidates
        .into_iter()
        .next()
        .map(|(_, _, path)| path)
        .ok_or_else(|| CliError::GroundTruthNotFound(dataset_dir.display().to_string()).into())
}

/// Pick the structured output CSV a parser wrote for one dataset
pub fn find_prediction(output_dir: &Path) -> Result<PathBuf> {
    let pattern = format!(
        "{}/*{STRUCTURED_SUFFIX}",
        Pattern::escape(&output_dir.to_string_lossy())
    );
    let paths = glob(&pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))?;

    let mut files = Vec::new();
    for path in paths {
        let path = path.with_context(|| format!("Error resolving pattern: {pattern}"))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    files
        .into_iter()
        .next()
        .ok_or_else(|| CliError::PredictionNotFound(output_dir.display().to_string()).into())
}
