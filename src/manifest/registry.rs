//! Resource family registry
//!
//! A manifest mixes several kinds of documents. Each kind is handled by a
//! [`ResourceFamily`]: a matcher that inspects the `kind`/`type` envelope and
//! a decoder that turns the body into a [`Resource`].
//!
//! Families are tried in registration order and **the first match wins**.
//! Two families must never claim the same kind/type pair: the later one
//! would never be reached.

use crate::core::{Resource, Secret, Signature};
use crate::manifest::{error::Result, raw::RawResource};
use crate::ssh;
use tracing::debug;

/// Predicate deciding whether a family owns an envelope
pub type Matcher = fn(&RawResource) -> bool;

/// Decoder invoked once a family's matcher accepted an envelope
pub type Decoder = fn(&RawResource) -> Result<Resource>;

/// One kind of manifest document and how to decode it
#[derive(Debug, Clone, Copy)]
pub struct ResourceFamily {
    name: &'static str,
    matcher: Matcher,
    decoder: Decoder,
}

impl ResourceFamily {
    pub const fn new(name: &'static str, matcher: Matcher, decoder: Decoder) -> Self {
        Self {
            name,
            matcher,
            decoder,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, raw: &RawResource) -> bool {
        (self.matcher)(raw)
    }

    /// Decode the envelope if this family owns it.
    ///
    /// `Ok(None)` means "not mine"; an error means the document was claimed
    /// but could not be decoded or validated.
    pub fn parse(&self, raw: &RawResource) -> Result<Option<Resource>> {
        if !self.matches(raw) {
            return Ok(None);
        }
        (self.decoder)(raw).map(Some)
    }
}

/// Ordered, read-only list of resource families
#[derive(Debug, Clone, Default)]
pub struct Registry {
    families: Vec<ResourceFamily>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The families understood by the SSH runner: signature, secret, ssh pipeline
    pub fn builtin() -> Self {
        Self::new()
            .register(signature_family())
            .register(secret_family())
            .register(ssh::family())
    }

    /// Append a family. It is consulted after every family registered before it.
    pub fn register(mut self, family: ResourceFamily) -> Self {
        self.families.push(family);
        self
    }

    pub fn families(&self) -> &[ResourceFamily] {
        &self.families
    }

    /// First family whose matcher accepts the envelope
    pub fn resolve(&self, raw: &RawResource) -> Option<&ResourceFamily> {
        self.families.iter().find(|family| family.matches(raw))
    }

    /// Dispatch an envelope to its family and decode it
    pub fn parse(&self, raw: &RawResource) -> Result<Option<Resource>> {
        match self.resolve(raw) {
            Some(family) => {
                debug!(
                    family = family.name(),
                    kind = %raw.kind,
                    resource_type = %raw.r#type,
                    "matched resource family"
                );
                family.parse(raw)
            }
            None => Ok(None),
        }
    }
}

fn signature_family() -> ResourceFamily {
    ResourceFamily::new("signature", |raw| raw.kind == "signature", decode_signature)
}

fn secret_family() -> ResourceFamily {
    ResourceFamily::new("secret", |raw| raw.kind == "secret", decode_secret)
}

fn decode_signature(raw: &RawResource) -> Result<Resource> {
    let signature: Signature = serde_yaml::from_value(raw.body.clone())?;
    Ok(signature.into())
}

fn decode_secret(raw: &RawResource) -> Result<Resource> {
    let secret: Secret = serde_yaml::from_value(raw.body.clone())?;
    Ok(secret.into())
}
