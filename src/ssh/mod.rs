//! The `pipeline`/`ssh` resource family
//!
//! Claims documents with `kind: pipeline` and `type: ssh`, decodes them into a
//! [`Pipeline`] and lints the result.

pub mod lint;

pub use lint::{lint, LintError};

use crate::core::{Pipeline, Resource};
use crate::manifest::{ManifestError, RawResource, ResourceFamily};
use tracing::{debug, warn};

/// Kind claimed by this family
pub const KIND: &str = "pipeline";

/// Type claimed by this family
pub const TYPE: &str = "ssh";

/// Registry entry for ssh pipelines
pub fn family() -> ResourceFamily {
    ResourceFamily::new("ssh pipeline", matches, decode_resource)
}

/// Whether this family owns the envelope. Only the discriminators are
/// inspected, so a match says nothing about whether the body decodes.
pub fn matches(raw: &RawResource) -> bool {
    raw.kind == KIND && raw.r#type == TYPE
}

/// Map the document body onto a [`Pipeline`] and fill in defaults.
///
/// Does not lint; see [`parse`] for the full decode-and-validate pass.
pub fn decode(raw: &RawResource) -> Result<Pipeline, ManifestError> {
    let mut pipeline: Pipeline = serde_yaml::from_value(raw.body.clone())?;
    pipeline.kind.clone_from(&raw.kind);
    pipeline.r#type.clone_from(&raw.r#type);
    pipeline.apply_defaults();
    debug!(
        pipeline = %pipeline.name,
        steps = pipeline.steps.len(),
        "decoded ssh pipeline"
    );
    Ok(pipeline)
}

/// Decode and lint the envelope if this family owns it.
///
/// `Ok(None)` means the envelope belongs to some other family.
pub fn parse(raw: &RawResource) -> Result<Option<Pipeline>, ManifestError> {
    if !matches(raw) {
        return Ok(None);
    }
    let pipeline = decode(raw)?;
    if let Err(source) = lint(&pipeline) {
        warn!(pipeline = %pipeline.name, error = %source, "pipeline failed lint");
        return Err(ManifestError::Lint {
            pipeline: pipeline.name,
            source,
        });
    }
    Ok(Some(pipeline))
}

fn decode_resource(raw: &RawResource) -> Result<Resource, ManifestError> {
    match parse(raw)? {
        Some(pipeline) => Ok(pipeline.into()),
        None => Err(ManifestError::UnknownResource {
            kind: raw.kind.clone(),
            resource_type: raw.r#type.clone(),
        }),
    }
}
