//! CLI command implementations

use crate::config::CliConfig;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod batch;
pub mod compare;
pub mod generate_config;
pub mod validate;

/// Clustering accuracy evaluation for log parsers
#[derive(Debug, Parser)]
#[command(name = "logeval", version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output and logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare one parser output against its ground truth
    Compare(compare::CompareArgs),

    /// Evaluate every method on every dataset of a benchmark layout
    Batch(batch::BatchArgs),

    /// Write a commented configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Check a configuration file
    ValidateConfig(validate::ValidateArgs),
}

impl Cli {
    /// Dispatch to the selected command
    pub fn run(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {self:?}");

        match &self.command {
            Commands::GenerateConfig(args) => args.execute(),
            Commands::ValidateConfig(args) => args.execute(),
            Commands::Compare(args) => args.execute(&self.load_config()?),
            Commands::Batch(args) => args.execute(&self.load_config()?, self.quiet),
        }
    }

    fn load_config(&self) -> Result<CliConfig> {
        CliConfig::load(self.config.as_deref())
    }
}

/// Initialize logging based on verbosity level
pub fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // A second init (e.g. from tests) keeps the first logger.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}
