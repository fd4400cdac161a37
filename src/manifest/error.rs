//! Manifest error types

use crate::ssh::LintError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning a manifest into resources
#[derive(Debug, Error)]
pub enum ManifestError {
    /// YAML syntax error, or a document whose shape does not fit its schema
    #[error("malformed manifest: {0}")]
    Malformed(#[from] serde_yaml::Error),

    /// Document is well-formed YAML but cannot be a resource
    #[error("invalid resource in document {document}: {reason}")]
    Invalid { document: usize, reason: String },

    /// Pipeline decoded but failed a lint rule
    #[error("pipeline '{pipeline}' failed lint: {source}")]
    Lint {
        pipeline: String,
        #[source]
        source: LintError,
    },

    /// No registered resource family claims the document
    #[error("unknown resource: kind '{kind}', type '{resource_type}'")]
    UnknownResource { kind: String, resource_type: String },

    #[error("failed to read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ManifestError {
    /// The lint failure behind this error, if any
    pub fn lint_error(&self) -> Option<&LintError> {
        match self {
            ManifestError::Lint { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ManifestError::Malformed(_) | ManifestError::Invalid { .. })
    }
}

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;
