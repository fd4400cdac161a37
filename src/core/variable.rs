//! Variable model - a literal value or a reference to a named secret

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yaml::Value;

/// Key that marks a variable mapping as a secret reference
pub const FROM_SECRET: &str = "from_secret";

/// A configuration value that is either written inline or pulled from a secret store.
///
/// Secrets are never resolved here; a `Secret` only carries the name to look up later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Variable {
    /// No value was provided
    #[default]
    Absent,
    /// Inline value
    Literal(String),
    /// Name of the secret holding the value
    Secret(String),
}

impl Variable {
    /// Create a literal variable
    pub fn literal(value: impl Into<String>) -> Self {
        Variable::Literal(value.into())
    }

    /// Create a secret reference
    pub fn secret(name: impl Into<String>) -> Self {
        Variable::Secret(name.into())
    }

    /// Whether a value or secret name is present. Content is not inspected
    /// beyond being non-empty.
    pub fn is_set(&self) -> bool {
        match self {
            Variable::Absent => false,
            Variable::Literal(value) => !value.is_empty(),
            Variable::Secret(name) => !name.is_empty(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Variable::Absent)
    }

    /// The inline value, if this is a literal
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Variable::Literal(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// The secret name, if this is a secret reference
    pub fn secret_name(&self) -> Option<&str> {
        match self {
            Variable::Secret(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Human readable form that never needs the secret value
    pub fn describe(&self) -> String {
        match self {
            Variable::Absent => "<unset>".to_string(),
            Variable::Literal(value) => value.clone(),
            Variable::Secret(name) => format!("<secret:{}>", name),
        }
    }

    /// Build a variable from either of its YAML shapes: a bare scalar or a
    /// `{from_secret: name}` mapping.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(Variable::Absent),
            Value::String(s) => Ok(Variable::Literal(s.clone())),
            Value::Number(n) => Ok(Variable::Literal(n.to_string())),
            Value::Bool(b) => Ok(Variable::Literal(b.to_string())),
            Value::Mapping(map) => match map.get(FROM_SECRET) {
                Some(Value::String(name)) => Ok(Variable::Secret(name.clone())),
                Some(other) => Err(format!(
                    "`{}` must be a string, got {}",
                    FROM_SECRET,
                    describe_kind(other)
                )),
                None => Err(format!("variable mapping requires a `{}` key", FROM_SECRET)),
            },
            other => Err(format!(
                "expected a string or a `{}` mapping, got {}",
                FROM_SECRET,
                describe_kind(other)
            )),
        }
    }
}

fn describe_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

impl<'de> Deserialize<'de> for Variable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Variable::from_value(&value).map_err(de::Error::custom)
    }
}

impl Serialize for Variable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Variable::Absent => serializer.serialize_none(),
            Variable::Literal(value) => serializer.serialize_str(value),
            Variable::Secret(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(FROM_SECRET, name)?;
                map.end()
            }
        }
    }
}
