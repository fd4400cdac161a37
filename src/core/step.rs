//! Step domain model

use crate::core::{condition::Conditions, variable::Variable};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Shell used for steps on every platform except Windows
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Shell used for steps on Windows hosts
pub const WINDOWS_SHELL: &str = "powershell";

/// What a failing step means for the rest of the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Failure fails the pipeline
    #[default]
    #[serde(alias = "")]
    Fail,
    /// Failure is recorded but does not fail the pipeline
    Ignore,
    /// The step is never marked as failed
    Never,
}

/// A single unit of work executed on the remote host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Step name, unique within the pipeline
    #[serde(default)]
    pub name: String,

    /// Shell used to run the commands. Filled in from the platform when absent.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub shell: String,

    /// Run in the background without blocking the pipeline
    #[serde(default)]
    pub detach: bool,

    /// Names of sibling steps that must finish first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Commands, in execution order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,

    /// Environment passed to the commands, in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub environment: IndexMap<String, Variable>,

    #[serde(default)]
    pub failure: FailurePolicy,

    /// Conditions under which the step runs
    #[serde(default, skip_serializing_if = "Conditions::is_empty")]
    pub when: Conditions,
}

impl Step {
    /// Create a step with the given name and nothing else
    pub fn named(name: impl Into<String>) -> Self {
        Step {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Names of secrets referenced from this step's environment
    pub fn secret_refs(&self) -> impl Iterator<Item = &str> {
        self.environment.values().filter_map(Variable::secret_name)
    }
}

/// Platform-appropriate default shell for an operating system name
pub fn default_shell(os: &str) -> &'static str {
    if os.eq_ignore_ascii_case("windows") {
        WINDOWS_SHELL
    } else {
        DEFAULT_SHELL
    }
}
