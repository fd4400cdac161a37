//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{ListCommand, ValidateCommand};
use std::ffi::OsString;

/// Decode and lint ssh runner manifests
#[derive(Debug, Parser, Clone)]
#[command(name = "ssh-runner")]
#[command(author = "ssh-runner Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Decode and lint manifests for the SSH pipeline runner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Decode and lint every resource in a manifest
    Validate(ValidateCommand),

    /// List the resources in a manifest
    List(ListCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
