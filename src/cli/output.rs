//! CLI output formatting

use crate::core::{FailurePolicy, Pipeline, Resource};
use crate::manifest::ManifestError;
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");

/// One-line description of a resource
pub fn format_resource(resource: &Resource) -> String {
    let kind = match resource.resource_type() {
        "" => resource.kind().to_string(),
        t => format!("{}/{}", resource.kind(), t),
    };

    match resource {
        Resource::Signature(_) => format!("{}", style(kind).dim()),
        Resource::Secret(secret) => format!("{} {}", style(kind).dim(), style(&secret.name).cyan()),
        Resource::Pipeline(pipeline) => format!(
            "{} {} ({} steps)",
            style(kind).dim(),
            style(&pipeline.name).bold(),
            pipeline.steps.len()
        ),
    }
}

/// Multi-line summary of a pipeline: target host and steps
pub fn format_pipeline(pipeline: &Pipeline) -> String {
    let server = &pipeline.server;
    let mut out = format!(
        "  Pipeline: {}\n  Server: {}@{}\n  Platform: {}/{}\n",
        style(&pipeline.name).bold(),
        server.user.describe(),
        server.host.describe(),
        pipeline.platform.os,
        pipeline.platform.arch
    );

    for (i, step) in pipeline.steps.iter().enumerate() {
        out.push_str(&format!(
            "    {}. {} [{}]",
            i + 1,
            style(&step.name).cyan(),
            step.shell
        ));
        if !step.depends_on.is_empty() {
            out.push_str(&format!(" after {}", step.depends_on.join(", ")));
        }
        match step.failure {
            FailurePolicy::Fail => {}
            FailurePolicy::Ignore => out.push_str(&format!(" {}", style("(failure ignored)").dim())),
            FailurePolicy::Never => out.push_str(&format!(" {}", style("(never fails)").dim())),
        }
        out.push('\n');
    }

    let secrets = pipeline.secret_refs();
    if !secrets.is_empty() {
        out.push_str(&format!("  Secrets: {}\n", style(secrets.join(", ")).dim()));
    }
    out
}

/// Describe a manifest error, pointing at the failing lint rule when there is one
pub fn format_error(error: &ManifestError) -> String {
    match error {
        ManifestError::Lint { pipeline, source } => format!(
            "pipeline {}: {}",
            style(pipeline).bold(),
            style(source).red()
        ),
        other => format!("{}", style(other).red()),
    }
}
