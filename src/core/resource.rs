//! Top-level manifest resources

use crate::core::pipeline::Pipeline;
use serde::{Deserialize, Serialize};

/// Signature document used to verify the manifest has not been tampered with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub kind: String,
    pub hmac: String,
}

/// Encrypted secret shipped inside the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub kind: String,

    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub r#type: String,

    pub name: String,

    /// Encrypted payload
    #[serde(default)]
    pub data: String,
}

/// A decoded manifest document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Resource {
    Signature(Signature),
    Secret(Secret),
    Pipeline(Box<Pipeline>),
}

impl Resource {
    pub fn kind(&self) -> &str {
        match self {
            Resource::Signature(s) => &s.kind,
            Resource::Secret(s) => &s.kind,
            Resource::Pipeline(p) => &p.kind,
        }
    }

    pub fn resource_type(&self) -> &str {
        match self {
            Resource::Signature(_) => "",
            Resource::Secret(s) => &s.r#type,
            Resource::Pipeline(p) => &p.r#type,
        }
    }

    /// Name of the resource, if the kind carries one
    pub fn name(&self) -> Option<&str> {
        match self {
            Resource::Signature(_) => None,
            Resource::Secret(s) => Some(s.name.as_str()),
            Resource::Pipeline(p) => Some(p.name.as_str()),
        }
    }

    pub fn as_pipeline(&self) -> Option<&Pipeline> {
        match self {
            Resource::Pipeline(p) => Some(p.as_ref()),
            _ => None,
        }
    }

    pub fn as_secret(&self) -> Option<&Secret> {
        match self {
            Resource::Secret(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_signature(&self) -> Option<&Signature> {
        match self {
            Resource::Signature(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Pipeline> for Resource {
    fn from(pipeline: Pipeline) -> Self {
        Resource::Pipeline(Box::new(pipeline))
    }
}

impl From<Secret> for Resource {
    fn from(secret: Secret) -> Self {
        Resource::Secret(secret)
    }
}

impl From<Signature> for Resource {
    fn from(signature: Signature) -> Self {
        Resource::Signature(signature)
    }
}
