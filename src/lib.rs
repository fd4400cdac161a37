//! ssh-runner - manifest decoding and linting for a CI runner that executes
//! pipelines on remote hosts over SSH

pub mod cli;
pub mod core;
pub mod manifest;
pub mod ssh;

// Re-export commonly used types
pub use crate::core::{Condition, Conditions, FailurePolicy, Pipeline, Resource, Server, Step, Variable};
pub use crate::manifest::{Manifest, ManifestError, ParseOptions, RawResource, Registry, ResourceFamily, UnknownPolicy};
pub use crate::ssh::{lint, LintError};
