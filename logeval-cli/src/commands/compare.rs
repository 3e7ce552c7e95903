//! Compare command implementation

use crate::config::CliConfig;
use crate::input::LabelReader;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::Args;
use logeval_core::{Evaluator, EvaluatorConfig, JobOutcome};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Arguments for the compare command
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Ground-truth structured CSV
    #[arg(short, long, value_name = "FILE", required = true)]
    pub truth: PathBuf,

    /// Parser output structured CSV
    #[arg(short, long, value_name = "FILE", required = true)]
    pub pred: PathBuf,

    /// Method name shown in the output
    #[arg(short, long, default_value = "pred")]
    pub method: String,

    /// Dataset name shown in the output (default: directory of the truth file)
    #[arg(short, long)]
    pub dataset: Option<String>,

    /// Output format (default: output.default_format from the config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only compute GA and PA
    #[arg(long)]
    pub strict: bool,
}

impl CompareArgs {
    /// Execute the compare command
    pub fn execute(&self, config: &CliConfig) -> Result<()> {
        log::info!(
            "Comparing {} against {}",
            self.pred.display(),
            self.truth.display()
        );

        let reader = LabelReader::new(config.columns.label_candidates.clone());
        let truth = reader.read_path(&self.truth)?;
        let pred = reader.read_path(&self.pred)?;

        let report = Evaluator::new(self.evaluator_config(config))
            .evaluate(&truth, &pred)
            .with_context(|| {
                format!(
                    "Cannot compare {} with {}",
                    self.pred.display(),
                    self.truth.display()
                )
            })?;
        log::debug!("Report: {report:?}");

        let outcome = JobOutcome::ok(&self.method, self.dataset_name(), report.to_record())
            .with_sources(
                Some(self.truth.display().to_string()),
                Some(self.pred.display().to_string()),
            );

        let format = match self.format {
            Some(format) => format,
            None => OutputFormat::from_config(&config.output.default_format)?,
        };
        let mut formatter = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                format.formatter(BufWriter::new(file), config.output.pretty_json)
            }
            None => format.formatter(io::stdout(), config.output.pretty_json),
        };
        formatter.format_outcome(&outcome)?;
        formatter.finish()
    }

    fn evaluator_config(&self, config: &CliConfig) -> EvaluatorConfig {
        if self.strict {
            EvaluatorConfig::strict_only()
        } else {
            config.evaluator_config()
        }
    }

    fn dataset_name(&self) -> String {
        self.dataset.clone().unwrap_or_else(|| {
            self.truth
                .parent()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "dataset".to_string())
        })
    }
}
