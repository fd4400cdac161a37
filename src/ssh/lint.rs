//! Semantic checks for ssh pipelines
//!
//! Rules run in a fixed order and the first violation is reported:
//! empty step names, duplicate step names, detached steps, then the server
//! connection settings.

use crate::core::Pipeline;
use std::collections::HashSet;
use thiserror::Error;

/// A rule an otherwise well-formed pipeline breaks
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LintError {
    #[error("linter: missing name")]
    MissingName,

    #[error("linter: duplicate name: {0}")]
    DuplicateName(String),

    #[error("linter: detached step not permitted: {0}")]
    DetachedStep(String),

    #[error("linter: missing host")]
    MissingHost,

    #[error("linter: missing user")]
    MissingUser,

    #[error("linter: missing password or ssh key")]
    MissingCredentials,
}

/// Validate a decoded pipeline. Pure; does not touch the pipeline or any
/// external state.
pub fn lint(pipeline: &Pipeline) -> Result<(), LintError> {
    check_names(pipeline)?;
    check_detached(pipeline)?;
    check_server(pipeline)?;
    Ok(())
}

fn check_names(pipeline: &Pipeline) -> Result<(), LintError> {
    if pipeline.steps.iter().any(|s| s.name.is_empty()) {
        return Err(LintError::MissingName);
    }

    let mut seen = HashSet::new();
    for step in &pipeline.steps {
        if !seen.insert(step.name.as_str()) {
            return Err(LintError::DuplicateName(step.name.clone()));
        }
    }
    Ok(())
}

fn check_detached(pipeline: &Pipeline) -> Result<(), LintError> {
    match pipeline.steps.iter().find(|s| s.detach) {
        Some(step) => Err(LintError::DetachedStep(step.name.clone())),
        None => Ok(()),
    }
}

fn check_server(pipeline: &Pipeline) -> Result<(), LintError> {
    let server = &pipeline.server;
    if !server.host.is_set() {
        return Err(LintError::MissingHost);
    }
    if !server.user.is_set() {
        return Err(LintError::MissingUser);
    }
    if !server.has_credentials() {
        return Err(LintError::MissingCredentials);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Server, Step, Variable};

    fn server() -> Server {
        Server {
            host: Variable::literal("localhost"),
            user: Variable::literal("root"),
            password: Variable::literal("root"),
            ssh_key: Variable::Absent,
        }
    }

    fn pipeline_with(steps: Vec<Step>) -> Pipeline {
        Pipeline {
            server: server(),
            steps,
            ..Default::default()
        }
    }

    #[test]
    fn test_lint_passes() {
        let pipeline = pipeline_with(vec![Step::named("build"), Step::named("test")]);
        assert_eq!(lint(&pipeline), Ok(()));
    }

    #[test]
    fn test_lint_passes_without_steps() {
        assert_eq!(lint(&pipeline_with(vec![])), Ok(()));
    }

    #[test]
    fn test_duplicate_name() {
        let pipeline = pipeline_with(vec![Step::named("build"), Step::named("build")]);
        assert_eq!(lint(&pipeline), Err(LintError::DuplicateName("build".to_string())));
    }

    #[test]
    fn test_empty_name() {
        let pipeline = pipeline_with(vec![Step::named("build"), Step::named("")]);
        assert_eq!(lint(&pipeline), Err(LintError::MissingName));
    }

    #[test]
    fn test_detached_step() {
        let mut step = Step::named("build");
        step.detach = true;
        let pipeline = pipeline_with(vec![step]);
        assert_eq!(lint(&pipeline), Err(LintError::DetachedStep("build".to_string())));
    }

    #[test]
    fn test_rule_order() {
        // detached and duplicated, but the empty name is reported first
        let mut detached = Step::named("build");
        detached.detach = true;
        let pipeline = pipeline_with(vec![detached.clone(), Step::named("build"), Step::named("")]);
        assert_eq!(lint(&pipeline), Err(LintError::MissingName));

        let pipeline = pipeline_with(vec![detached, Step::named("build")]);
        assert_eq!(lint(&pipeline), Err(LintError::DuplicateName("build".to_string())));

        let mut pipeline = pipeline_with(vec![Step::named("")]);
        pipeline.server = Server::default();
        assert_eq!(lint(&pipeline), Err(LintError::MissingName));
    }

    #[test]
    fn test_missing_host() {
        let mut pipeline = pipeline_with(vec![]);
        pipeline.server.host = Variable::Absent;
        assert_eq!(lint(&pipeline), Err(LintError::MissingHost));
    }

    #[test]
    fn test_missing_user() {
        let mut pipeline = pipeline_with(vec![]);
        pipeline.server.user = Variable::Absent;
        assert_eq!(lint(&pipeline), Err(LintError::MissingUser));
    }

    #[test]
    fn test_missing_credentials() {
        let mut pipeline = pipeline_with(vec![]);
        pipeline.server.password = Variable::Absent;
        assert_eq!(lint(&pipeline), Err(LintError::MissingCredentials));

        pipeline.server.ssh_key = Variable::secret("private_key");
        assert_eq!(lint(&pipeline), Ok(()));
    }

    #[test]
    fn test_secret_references_count_as_present() {
        let mut pipeline = pipeline_with(vec![]);
        pipeline.server = Server {
            host: Variable::secret("host"),
            user: Variable::secret("user"),
            password: Variable::Absent,
            ssh_key: Variable::secret("key"),
        };
        assert_eq!(lint(&pipeline), Ok(()));
    }

    #[test]
    fn test_empty_literal_is_missing() {
        let mut pipeline = pipeline_with(vec![]);
        pipeline.server.host = Variable::literal("");
        assert_eq!(lint(&pipeline), Err(LintError::MissingHost));
    }

    #[test]
    fn test_lint_is_idempotent() {
        let pipeline = pipeline_with(vec![Step::named("build"), Step::named("build")]);
        let before = pipeline.clone();
        assert_eq!(lint(&pipeline), lint(&pipeline));
        assert_eq!(pipeline, before);
    }

    #[test]
    fn test_dangling_depends_on_is_allowed() {
        let mut step = Step::named("build");
        step.depends_on = vec!["clone".to_string()];
        assert_eq!(lint(&pipeline_with(vec![step])), Ok(()));
    }
}
