//! Manifest loading
//!
//! A manifest is a multi-document YAML stream. Each document is wrapped in a
//! [`RawResource`] envelope and handed to the [`Registry`], which picks the
//! resource family that owns it.

pub mod error;
pub mod raw;
pub mod registry;

pub use error::{ManifestError, Result};
pub use raw::RawResource;
pub use registry::{Registry, ResourceFamily};

use crate::core::{Pipeline, Resource, Secret, Signature};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// What to do with a document no registered family claims
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownPolicy {
    /// Fail the whole manifest
    #[default]
    Reject,
    /// Drop the document and keep going
    Skip,
}

/// Options controlling how a manifest is parsed
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub unknown: UnknownPolicy,
}

/// The decoded resources of a manifest, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub resources: Vec<Resource>,
}

impl Manifest {
    /// Parse a manifest with default options
    pub fn from_yaml(yaml: &str, registry: &Registry) -> Result<Self> {
        parse(yaml, registry, ParseOptions::default())
    }

    /// Load and parse a manifest file with default options
    pub fn from_file<P: AsRef<Path>>(path: P, registry: &Registry) -> Result<Self> {
        parse_file(path, registry, ParseOptions::default())
    }

    pub fn pipelines(&self) -> impl Iterator<Item = &Pipeline> {
        self.resources.iter().filter_map(Resource::as_pipeline)
    }

    pub fn secrets(&self) -> impl Iterator<Item = &Secret> {
        self.resources.iter().filter_map(Resource::as_secret)
    }

    /// The manifest signature, if one is present
    pub fn signature(&self) -> Option<&Signature> {
        self.resources.iter().find_map(Resource::as_signature)
    }

    pub fn find_pipeline(&self, name: &str) -> Option<&Pipeline> {
        self.pipelines().find(|p| p.name == name)
    }

    pub fn find_secret(&self, name: &str) -> Option<&Secret> {
        self.secrets().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Parse every document in a YAML stream.
///
/// Decoding stops at the first document that fails; the error is returned
/// unchanged and no partial manifest is produced.
pub fn parse(yaml: &str, registry: &Registry, options: ParseOptions) -> Result<Manifest> {
    let mut resources = Vec::new();

    for (index, document) in serde_yaml::Deserializer::from_str(yaml).enumerate() {
        let mut value = Value::deserialize(document)?;
        value.apply_merge()?;
        let Some(raw) = RawResource::from_value(index, value)? else {
            debug!(document = index, "skipping empty document");
            continue;
        };

        match registry.parse(&raw)? {
            Some(resource) => resources.push(resource),
            None => match options.unknown {
                UnknownPolicy::Reject => {
                    return Err(ManifestError::UnknownResource {
                        kind: raw.kind,
                        resource_type: raw.r#type,
                    })
                }
                UnknownPolicy::Skip => {
                    warn!(
                        document = index,
                        kind = %raw.kind,
                        resource_type = %raw.r#type,
                        "skipping unknown resource"
                    );
                }
            },
        }
    }

    info!(resources = resources.len(), "parsed manifest");
    Ok(Manifest { resources })
}

/// Read a manifest from disk and parse it
pub fn parse_file<P: AsRef<Path>>(path: P, registry: &Registry, options: ParseOptions) -> Result<Manifest> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "loaded manifest");
    parse(&content, registry, options)
}
