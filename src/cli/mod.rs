//! Command-line interface module.
//!
//! This module provides the command definitions and output
//! formatting for the sitedeploy CLI.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;
