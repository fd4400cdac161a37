//! Pipeline domain model

use crate::core::{
    condition::Conditions,
    step::{default_shell, Step},
    variable::Variable,
};
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Pipeline name used when the document does not set one
pub const DEFAULT_NAME: &str = "default";

/// Operating system assumed when the platform is not set
pub const DEFAULT_OS: &str = "linux";

/// Architecture assumed when the platform is not set
pub const DEFAULT_ARCH: &str = "amd64";

/// A pipeline executed on a remote host over SSH
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub kind: String,

    #[serde(rename = "type", default)]
    pub r#type: String,

    #[serde(default)]
    pub name: String,

    /// Manifest version; numeric versions are kept as text
    #[serde(default, deserialize_with = "scalar_string", skip_serializing_if = "String::is_empty")]
    pub version: String,

    /// Remote host the steps run on
    #[serde(default)]
    pub server: Server,

    #[serde(default)]
    pub workspace: Workspace,

    #[serde(default)]
    pub platform: Platform,

    #[serde(default)]
    pub clone: CloneSettings,

    /// Conditions under which the whole pipeline runs
    #[serde(default, skip_serializing_if = "Conditions::is_empty")]
    pub trigger: Conditions,

    /// Steps, in execution order
    #[serde(default)]
    pub steps: Vec<Step>,

    /// Names of other pipelines in the manifest that must finish first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,

    /// Labels used to route the pipeline to a matching runner
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub node: IndexMap<String, String>,
}

/// Connection details for the remote host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    #[serde(default, skip_serializing_if = "Variable::is_absent")]
    pub host: Variable,

    #[serde(default, skip_serializing_if = "Variable::is_absent")]
    pub user: Variable,

    #[serde(default, skip_serializing_if = "Variable::is_absent")]
    pub password: Variable,

    #[serde(default, skip_serializing_if = "Variable::is_absent")]
    pub ssh_key: Variable,
}

impl Server {
    /// Whether some form of credential is configured
    pub fn has_credentials(&self) -> bool {
        self.password.is_set() || self.ssh_key.is_set()
    }
}

/// Working directory on the remote host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

/// Target platform of the remote host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    #[serde(default)]
    pub os: String,

    #[serde(default)]
    pub arch: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub variant: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
}

/// Repository clone behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneSettings {
    /// Skip the clone step entirely
    #[serde(default)]
    pub disable: bool,

    /// History depth; 0 means full history
    #[serde(default)]
    pub depth: u32,

    /// Skip TLS verification when cloning
    #[serde(default)]
    pub skip_verify: bool,
}

impl Pipeline {
    /// Get a step by name
    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }

    /// Step names in declaration order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }

    /// Names of every secret this pipeline refers to, in first-seen order
    pub fn secret_refs(&self) -> Vec<&str> {
        let server = [
            &self.server.host,
            &self.server.user,
            &self.server.password,
            &self.server.ssh_key,
        ];

        let mut names: Vec<&str> = Vec::new();
        let all = server
            .into_iter()
            .filter_map(Variable::secret_name)
            .chain(self.steps.iter().flat_map(Step::secret_refs));
        for name in all {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Fill in values the document may leave out: pipeline name, platform,
    /// and each step's shell.
    pub fn apply_defaults(&mut self) {
        if self.name.is_empty() {
            self.name = DEFAULT_NAME.to_string();
        }
        if self.platform.os.is_empty() {
            self.platform.os = DEFAULT_OS.to_string();
        }
        if self.platform.arch.is_empty() {
            self.platform.arch = DEFAULT_ARCH.to_string();
        }

        let shell = default_shell(&self.platform.os);
        for step in self.steps.iter_mut().filter(|s| s.shell.is_empty()) {
            step.shell = shell.to_string();
        }
    }
}

/// Accept a YAML string, number, or boolean as text
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(de::Error::custom("expected a scalar value")),
    }
}
