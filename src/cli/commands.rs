//! CLI command definitions

use crate::manifest::{ParseOptions, UnknownPolicy};
use clap::Args;

/// Decode and lint a manifest
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to the manifest YAML file
    #[arg(short, long)]
    pub file: String,

    /// Print the decoded manifest as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip documents no resource family understands instead of failing
    #[arg(long)]
    pub skip_unknown: bool,
}

/// List the resources in a manifest
#[derive(Debug, Args, Clone)]
pub struct ListCommand {
    /// Path to the manifest YAML file
    #[arg(short, long)]
    pub file: String,

    /// Skip documents no resource family understands instead of failing
    #[arg(long)]
    pub skip_unknown: bool,
}

/// Parse options for the given `--skip-unknown` flag
pub fn parse_options(skip_unknown: bool) -> ParseOptions {
    ParseOptions {
        unknown: if skip_unknown {
            UnknownPolicy::Skip
        } else {
            UnknownPolicy::Reject
        },
    }
}
