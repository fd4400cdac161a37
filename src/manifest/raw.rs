//! Raw resource envelope - the discriminator fields plus the undecoded body

use crate::manifest::error::{ManifestError, Result};
use serde_yaml::Value;

/// One manifest document before any schema has been applied
#[derive(Debug, Clone, PartialEq)]
pub struct RawResource {
    pub kind: String,
    pub r#type: String,
    /// The whole document, discriminator fields included
    pub body: Value,
}

impl RawResource {
    /// Build an envelope around a bare kind/type pair with an empty body
    pub fn new(kind: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            r#type: r#type.into(),
            body: Value::Mapping(Default::default()),
        }
    }

    /// Split a parsed document into an envelope.
    ///
    /// Returns `Ok(None)` for empty documents. `document` is the zero-based
    /// position in the stream and is only used for error reporting.
    pub fn from_value(document: usize, body: Value) -> Result<Option<Self>> {
        let map = match &body {
            Value::Null => return Ok(None),
            Value::Mapping(map) => map,
            _ => {
                return Err(ManifestError::Invalid {
                    document,
                    reason: "document is not a mapping".to_string(),
                })
            }
        };

        let kind = match map.get("kind") {
            Some(Value::String(kind)) if !kind.is_empty() => kind.clone(),
            Some(Value::String(_)) | None => {
                return Err(ManifestError::Invalid {
                    document,
                    reason: "missing kind".to_string(),
                })
            }
            Some(_) => {
                return Err(ManifestError::Invalid {
                    document,
                    reason: "kind must be a string".to_string(),
                })
            }
        };

        let r#type = match map.get("type") {
            Some(Value::String(t)) => t.clone(),
            None | Some(Value::Null) => String::new(),
            Some(_) => {
                return Err(ManifestError::Invalid {
                    document,
                    reason: "type must be a string".to_string(),
                })
            }
        };

        Ok(Some(Self { kind, r#type, body }))
    }
}
