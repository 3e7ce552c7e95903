//! logeval command-line entry point

use anyhow::Result;
use clap::Parser;
use logeval_cli::commands::Cli;

fn main() -> Result<()> {
    Cli::parse().run()
}
