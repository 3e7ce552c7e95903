//! Generate config command implementation

use crate::config::THREADS_ENV;
use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = "logeval.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, self.generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file");
        println!("2. Validate your configuration:");
        println!("   logeval validate-config {}", self.output.display());
        println!("3. Use it for evaluation:");
        println!(
            "   logeval --config {} batch --datasets <DIR> --predictions <DIR>",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        format!(
            r#"# logeval configuration

[evaluation]
# Prediction and ground-truth purity (predPure, gtPure)
purity = true
# Collapse pure clusters and report GA_friendly / PA_friendly / pureCoverage
collapse = true

[columns]
# Label columns tried in order; the first one present is used
label_candidates = ["EventId", "EventID", "eventId", "eventid"]

[output]
# Format used by `compare` when --format is not given: text, json or csv
default_format = "text"
# Batch runs are written to <results_dir>/<timestamp>/
results_dir = "results"
pretty_json = true

[performance]
# Evaluate batch pairs in parallel
parallel = true
# Worker threads, 0 = one per CPU (overridden by {THREADS_ENV})
worker_threads = 0
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("logeval.toml"),
            force: false,
        };

        let config = CliConfig::from_toml(&args.generate_template()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_execute_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("logeval.toml");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
            force: false,
        };

        assert!(args.execute().is_ok());
        let content = fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("[evaluation]"));
        assert!(content.contains(THREADS_ENV));
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("logeval.toml");
        fs::write(&output_path, "keep me").unwrap();

        let mut args = GenerateConfigArgs {
            output: output_path.clone(),
            force: false,
        };
        assert!(args.execute().is_err());
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "keep me");

        args.force = true;
        assert!(args.execute().is_ok());
        assert!(fs::read_to_string(&output_path)
            .unwrap()
            .contains("[performance]"));
    }
}
