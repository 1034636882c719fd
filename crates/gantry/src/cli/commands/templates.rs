//! Templates command

use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use tracing::info;

use gantry_core::config::load_config_or_default;
use gantry_core::TemplatesConfig;
use gantry_templates::{BuildReport, TemplateBuilder};

use crate::cli::{output, Cli, OutputFormat};

/// Backstage template generation
#[derive(Debug, Args)]
pub struct TemplatesCommand {
    #[command(subcommand)]
    pub command: TemplatesSubcommand,
}

/// Templates subcommands
#[derive(Debug, Subcommand)]
pub enum TemplatesSubcommand {
    /// Build Backstage templates from experience surveys
    Build(BuildCommand),
}

/// Build Backstage templates from experience surveys
#[derive(Debug, Args)]
pub struct BuildCommand {
    /// Directory holding one subdirectory per experience
    #[arg(long)]
    pub experiences_dir: Option<PathBuf>,

    /// Directory receiving the generated templates
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Location manifest path
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Show what would be written without writing
    #[arg(long)]
    pub dry_run: bool,
}

impl TemplatesCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        match &self.command {
            TemplatesSubcommand::Build(cmd) => cmd.execute(cli),
        }
    }
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(dry_run = self.dry_run, "executing templates build command");
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd)?;

        let settings = self.apply_overrides(config.templates);
        let report = TemplateBuilder::new(&cwd, settings)
            .dry_run(self.dry_run)
            .build()?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&json_report(&report))?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    print_report(&report);
                }
            }
        }

        Ok(())
    }

    fn apply_overrides(&self, mut settings: TemplatesConfig) -> TemplatesConfig {
        if let Some(dir) = &self.experiences_dir {
            settings.experiences_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(manifest) = &self.manifest {
            settings.manifest_file = manifest.clone();
        }
        settings
    }
}

fn json_report(report: &BuildReport) -> serde_json::Value {
    let experiences: Vec<serde_json::Value> = report
        .experiences
        .iter()
        .map(|e| serde_json::json!({ "experience": e.experience, "survey_refs": e.survey_refs }))
        .collect();
    let skipped: Vec<serde_json::Value> = report
        .skipped
        .iter()
        .map(|s| serde_json::json!({ "path": s.path.display().to_string(), "reason": s.reason }))
        .collect();

    serde_json::json!({
        "dry_run": report.dry_run,
        "experiences": experiences,
        "templates": report
            .templates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>(),
        "skipped": skipped,
        "manifest": report.manifest.display().to_string(),
        "manifest_targets": report.manifest_targets,
    })
}

fn print_report(report: &BuildReport) {
    let title = if report.dry_run {
        "Template Build (dry run)"
    } else {
        "Template Build"
    };
    println!("{}", output::header(title));
    println!();

    for experience in &report.experiences {
        let refs = if experience.survey_refs.is_empty() {
            style("none").dim().to_string()
        } else {
            experience.survey_refs.join(", ")
        };
        println!("{}", output::key_value(&experience.experience, &refs));
    }
    if !report.experiences.is_empty() {
        println!();
    }

    let verb = if report.dry_run { "Would write" } else { "Wrote" };
    for path in &report.templates {
        output::success(&format!(
            "{} {}",
            verb,
            output::path_style().apply_to(path.display())
        ));
    }
    for skipped in &report.skipped {
        output::warning(&format!(
            "Skipped {}: {}",
            output::path_style().apply_to(skipped.path.display()),
            skipped.reason
        ));
    }

    output::info(&format!(
        "{} {} with {} target(s)",
        verb,
        output::path_style().apply_to(report.manifest.display()),
        report.manifest_targets.len()
    ));
}
