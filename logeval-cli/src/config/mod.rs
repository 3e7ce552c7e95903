//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use logeval_core::EvaluatorConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding `performance.worker_threads`
pub const THREADS_ENV: &str = "LOGEVAL_THREADS";

/// Label columns tried in order when none are configured
pub const DEFAULT_LABEL_COLUMNS: &[&str] = &["EventId", "EventID", "eventId", "eventid"];

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Evaluation configuration
    #[serde(default)]
    pub evaluation: EvaluationConfig,

    /// Input column configuration
    #[serde(default)]
    pub columns: ColumnConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Which metric families to compute
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Compute prediction and ground-truth purity
    pub purity: bool,

    /// Collapse pure clusters and compute friendly GA/PA
    pub collapse: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            purity: true,
            collapse: true,
        }
    }
}

impl From<&EvaluationConfig> for EvaluatorConfig {
    fn from(config: &EvaluationConfig) -> Self {
        EvaluatorConfig::strict_only()
            .purity(config.purity)
            .collapse(config.collapse)
    }
}

/// Where labels live in structured CSV files
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ColumnConfig {
    /// Candidate column names, first match wins
    pub label_candidates: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            label_candidates: DEFAULT_LABEL_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format for `compare`
    pub default_format: String,

    /// Directory receiving timestamped batch runs
    pub results_dir: PathBuf,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            results_dir: PathBuf::from("results"),
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Evaluate batch jobs in parallel
    pub parallel: bool,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            worker_threads: 0,
        }
    }
}

impl PerformanceConfig {
    /// Worker threads after applying the environment override, 0 = auto
    pub fn effective_threads(&self) -> usize {
        env::var(THREADS_ENV)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(self.worker_threads)
    }
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: CliConfig =
            toml::from_str(text).map_err(|e| CliError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load the given file, or fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Check semantic constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.columns.label_candidates.is_empty() {
            return Err(CliError::ConfigError(
                "columns.label_candidates must not be empty".to_string(),
            )
            .into());
        }
        if self
            .columns
            .label_candidates
            .iter()
            .any(|c| c.trim().is_empty())
        {
            return Err(
                CliError::ConfigError("label column names must not be blank".to_string()).into(),
            );
        }
        if !["text", "json", "csv"].contains(&self.output.default_format.as_str()) {
            return Err(CliError::ConfigError(format!(
                "unknown output format '{}' (expected text, json or csv)",
                self.output.default_format
            ))
            .into());
        }
        Ok(())
    }

    /// Evaluator settings derived from this configuration
    pub fn evaluator_config(&self) -> EvaluatorConfig {
        (&self.evaluation).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert!(config.evaluation.purity);
        assert!(config.evaluation.collapse);
        assert_eq!(
            config.columns.label_candidates,
            vec!["EventId", "EventID", "eventId", "eventid"]
        );
        assert_eq!(config.output.default_format, "text");
        assert!(config.validate().is_ok());
        assert_eq!(config.evaluator_config(), EvaluatorConfig::full());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CliConfig::from_toml(
            r#"
[evaluation]
collapse = false

[columns]
label_candidates = ["TemplateId"]
"#,
        )
        .unwrap();

        assert!(config.evaluation.purity);
        assert!(!config.evaluation.collapse);
        assert_eq!(config.columns.label_candidates, vec!["TemplateId"]);
        assert_eq!(config.performance, PerformanceConfig::default());
        assert!(!config.evaluator_config().collapse);
    }

    #[test]
    fn test_empty_candidates_rejected() {
        let err = CliConfig::from_toml("[columns]\nlabel_candidates = []\n").unwrap_err();
        assert!(err.to_string().contains("label_candidates must not be empty"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = CliConfig::from_toml("[output]\ndefault_format = \"xml\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown output format 'xml'"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = CliConfig::from_toml("[evaluation\npurity = ").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[performance]\nworker_threads = 3\n").unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.performance.worker_threads, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/logeval.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = CliConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(CliConfig::from_toml(&text).unwrap(), config);
    }
}
