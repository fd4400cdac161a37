//! Trigger and step conditions

use serde::{Deserialize, Serialize};

/// Include/exclude filter over a single build attribute (branch, event, ...)
///
/// Accepts three YAML shapes: a mapping with `include`/`exclude` lists,
/// a bare list (shorthand for `include`), or a single string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConditionShape")]
pub struct Condition {
    /// Values that must match (empty = any)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Values that must not match
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ConditionShape {
    Single(String),
    List(Vec<String>),
    Full(ConditionMap),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConditionMap {
    #[serde(default)]
    include: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
}

impl From<ConditionShape> for Condition {
    fn from(shape: ConditionShape) -> Self {
        match shape {
            ConditionShape::Single(value) => Condition {
                include: vec![value],
                exclude: Vec::new(),
            },
            ConditionShape::List(include) => Condition {
                include,
                exclude: Vec::new(),
            },
            ConditionShape::Full(ConditionMap { include, exclude }) => Condition { include, exclude },
        }
    }
}

impl Condition {
    /// Condition that only admits the given values
    pub fn include<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition {
            include: values.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
        }
    }

    /// Condition that rejects the given values
    pub fn exclude<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition {
            include: Vec::new(),
            exclude: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Exclusion is checked first and always wins over inclusion.
    pub fn matches(&self, value: &str) -> bool {
        if self.exclude.iter().any(|v| v == value) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|v| v == value)
    }
}

/// Build attributes a set of conditions is evaluated against.
///
/// Attributes left as `None` are not consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchParams<'a> {
    pub action: Option<&'a str>,
    pub branch: Option<&'a str>,
    pub cron: Option<&'a str>,
    pub event: Option<&'a str>,
    pub instance: Option<&'a str>,
    pub reference: Option<&'a str>,
    pub repo: Option<&'a str>,
    pub status: Option<&'a str>,
    pub target: Option<&'a str>,
}

/// Named conditions attached to a pipeline trigger or a step `when` block.
/// All named conditions must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditions {
    #[serde(default, skip_serializing_if = "Condition::is_empty")]
    pub action: Condition,

    #[serde(default, skip_serializing_if = "Condition::is_empty")]
    pub branch: Condition,

    #[serde(default, skip_serializing_if = "Condition::is_empty")]
    pub cron: Condition,

    #[serde(default, skip_serializing_if = "Condition::is_empty")]
    pub event: Condition,

    #[serde(default, skip_serializing_if = "Condition::is_empty")]
    pub instance: Condition,

    /// Git reference (`ref` in YAML)
    #[serde(rename = "ref", default, skip_serializing_if = "Condition::is_empty")]
    pub reference: Condition,

    #[serde(default, skip_serializing_if = "Condition::is_empty")]
    pub repo: Condition,

    #[serde(default, skip_serializing_if = "Condition::is_empty")]
    pub status: Condition,

    #[serde(default, skip_serializing_if = "Condition::is_empty")]
    pub target: Condition,
}

impl Conditions {
    pub fn is_empty(&self) -> bool {
        self.pairs(&MatchParams::default())
            .iter()
            .all(|(condition, _)| condition.is_empty())
    }

    /// Evaluate every named condition against the build attributes
    pub fn matches(&self, params: &MatchParams<'_>) -> bool {
        self.pairs(params)
            .into_iter()
            .all(|(condition, value)| value.map_or(true, |v| condition.matches(v)))
    }

    fn pairs<'a>(&'a self, params: &MatchParams<'a>) -> [(&'a Condition, Option<&'a str>); 9] {
        [
            (&self.action, params.action),
            (&self.branch, params.branch),
            (&self.cron, params.cron),
            (&self.event, params.event),
            (&self.instance, params.instance),
            (&self.reference, params.reference),
            (&self.repo, params.repo),
            (&self.status, params.status),
            (&self.target, params.target),
        ]
    }
}
