use anyhow::{Context, Result};
use ssh_runner::cli::commands::{parse_options, ListCommand, ValidateCommand};
use ssh_runner::cli::output::*;
use ssh_runner::cli::{Cli, Command};
use ssh_runner::core::Resource;
use ssh_runner::manifest::{self, Registry};
use tracing::{error, Level};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str().to_lowercase()));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    let registry = Registry::builtin();

    match &cli.command {
        Command::Validate(cmd) => validate_manifest(cmd, &registry)?,
        Command::List(cmd) => list_resources(cmd, &registry)?,
    }

    Ok(())
}

fn validate_manifest(cmd: &ValidateCommand, registry: &Registry) -> Result<()> {
    println!("{} Validating manifest {}...", INFO, style(&cmd.file).dim());

    match manifest::parse_file(&cmd.file, registry, parse_options(cmd.skip_unknown)) {
        Ok(manifest) => {
            println!("{} Manifest is valid!", CHECK);
            println!("  Resources: {}", style(manifest.len()).cyan());
            for pipeline in manifest.pipelines() {
                print!("{}", format_pipeline(pipeline));
            }
            if manifest.signature().is_none() {
                println!("{} Manifest is not signed", WARN);
            }

            if cmd.json {
                let json = serde_json::to_string_pretty(&manifest)
                    .context("Failed to render manifest as JSON")?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", format_error(&e));
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn list_resources(cmd: &ListCommand, registry: &Registry) -> Result<()> {
    let manifest = manifest::parse_file(&cmd.file, registry, parse_options(cmd.skip_unknown))
        .with_context(|| format!("Failed to load manifest {}", cmd.file))?;

    if manifest.is_empty() {
        println!("{} No resources found", INFO);
        return Ok(());
    }

    println!("{} Resources in {}:", INFO, style(&cmd.file).bold());
    for (i, resource) in manifest.resources.iter().enumerate() {
        println!("  {}. {}", i + 1, format_resource(resource));
        if let Resource::Pipeline(pipeline) = resource {
            for step in &pipeline.steps {
                println!("       - {}", style(&step.name).cyan());
            }
        }
    }

    Ok(())
}
