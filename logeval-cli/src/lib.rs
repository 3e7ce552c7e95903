//! logeval CLI library
//!
//! This library provides the command-line interface for evaluating log
//! parser clustering accuracy against labelled benchmark datasets.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
