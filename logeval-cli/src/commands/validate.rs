//! Validate command implementation

use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate-config command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.file.display());

        match CliConfig::from_file(&self.file) {
            Ok(config) => {
                println!("✓ Configuration is valid!");
                println!(
                    "  Metrics: strict{}{}",
                    if config.evaluation.purity { ", purity" } else { "" },
                    if config.evaluation.collapse { ", friendly" } else { "" },
                );
                println!(
                    "  Label columns: {}",
                    config.columns.label_candidates.join(", ")
                );
                println!("  Results dir: {}", config.output.results_dir.display());
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {e:#}"))
            }
        }
    }
}
