//! Persisting batch runs under timestamped directories

use super::{CsvFormatter, OutputFormatter};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use logeval_core::{BatchSummary, JobOutcome};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Base name of the files written for each run
pub const RUN_FILE_STEM: &str = "eval-metrics";

/// JSON document written for a run
#[derive(Debug, Serialize)]
struct RunDocument<'a> {
    generated_at: &'a str,
    results: &'a [JobOutcome],
    summary: &'a BatchSummary,
}

/// Files produced by [`RunStore::save`]
#[derive(Debug, Clone, PartialEq)]
pub struct RunFiles {
    /// Run directory
    pub dir: PathBuf,
    /// `eval-metrics.json`
    pub json: PathBuf,
    /// `eval-metrics.csv`
    pub csv: PathBuf,
}

/// Writes each run into `<results_dir>/<timestamp>/`
#[derive(Debug, Clone)]
pub struct RunStore {
    results_dir: PathBuf,
    pretty_json: bool,
}

impl RunStore {
    /// Create a store rooted at `results_dir`
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
            pretty_json: true,
        }
    }

    /// Toggle pretty printing of the JSON file
    pub fn pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    /// Directory name for a run started at `at`, safe on every filesystem
    pub fn run_name(at: DateTime<Utc>) -> String {
        at.format("%Y-%m-%dT%H-%M-%S-%6f").to_string()
    }

    /// Save outcomes and their summary as JSON and CSV
    pub fn save(&self, outcomes: &[JobOutcome], summary: &BatchSummary) -> Result<RunFiles> {
        let generated_at = Self::run_name(Utc::now());
        self.save_as(&generated_at, outcomes, summary)
    }

    /// Save under an explicit run name
    pub fn save_as(
        &self,
        run_name: &str,
        outcomes: &[JobOutcome],
        summary: &BatchSummary,
    ) -> Result<RunFiles> {
        let dir = self.results_dir.join(run_name);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create run directory: {}", dir.display()))?;

        let files = RunFiles {
            json: dir.join(format!("{RUN_FILE_STEM}.json")),
            csv: dir.join(format!("{RUN_FILE_STEM}.csv")),
            dir,
        };

        let document = RunDocument {
            generated_at: run_name,
            results: outcomes,
            summary,
        };
        let mut writer = BufWriter::new(create(&files.json)?);
        if self.pretty_json {
            serde_json::to_writer_pretty(&mut writer, &document)?;
        } else {
            serde_json::to_writer(&mut writer, &document)?;
        }
        writeln!(writer)?;
        writer.flush()?;
        log::info!("Wrote {}", files.json.display());

        let mut table = CsvFormatter::new(BufWriter::new(create(&files.csv)?));
        for outcome in outcomes {
            table.format_outcome(outcome)?;
        }
        table.finish()?;
        log::info!("Wrote {}", files.csv.display());

        Ok(files)
    }
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))
}
