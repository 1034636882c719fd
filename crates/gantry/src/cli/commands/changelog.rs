//! Changelog command

use clap::{Args, Subcommand, ValueEnum};
use console::style;
use tracing::{info, warn};

use gantry_changelog::{
    load_schema, ChangeClassifier, Classification, FsFragments, LoadedSchema, PathRules, Verdict,
    MISSING_FRAGMENT_HINT, NOT_REQUIRED_NOTE,
};
use gantry_core::config::load_config_or_default;
use gantry_git::{ChangeSet, DiffSource, GitRepo};

use crate::cli::{output, Cli, OutputFormat};

/// Changelog fragment checks
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    #[command(subcommand)]
    pub command: ChangelogSubcommand,
}

/// Changelog subcommands
#[derive(Debug, Subcommand)]
pub enum ChangelogSubcommand {
    /// Check that the change carries a valid changelog fragment
    Check(CheckCommand),
}

/// How the change list is computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DiffBackend {
    /// Run `git diff --name-status`
    #[default]
    Cli,
    /// Diff with libgit2, without spawning git
    Libgit2,
}

/// Check that the change carries a valid changelog fragment
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Base branch, tag or commit the change is compared against
    #[arg(long = "ref", value_name = "REF")]
    pub reference: String,

    /// Remote the base lives on (defaults to the configured remote)
    #[arg(long)]
    pub remote: Option<String>,

    /// Diff backend
    #[arg(long, value_enum, default_value = "cli")]
    pub backend: DiffBackend,
}

impl ChangelogCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<u8> {
        match &self.command {
            ChangelogSubcommand::Check(cmd) => cmd.execute(cli),
        }
    }
}

impl CheckCommand {
    /// Execute the check command, returning the exit code for its verdict
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<u8> {
        info!(
            reference = %self.reference,
            remote = ?self.remote,
            backend = ?self.backend,
            "executing changelog check command"
        );
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd)?;

        let mut settings = config.changelog;
        if let Some(remote) = &self.remote {
            settings.remote = remote.clone();
        }

        let rules = PathRules::new(&settings)?;
        let repo = GitRepo::discover(&cwd)?;
        let root = repo.root().to_path_buf();
        let loaded = load_schema(&root.join(&settings.schema_path));
        let reference = settings.comparison_ref(&self.reference);

        let source: Box<dyn DiffSource> = match self.backend {
            DiffBackend::Cli => Box::new(repo.cli_diff()),
            DiffBackend::Libgit2 => Box::new(repo),
        };
        info!(backend = source.name(), reference = %reference, "collecting changes");
        let changes = source.changes_since(&reference)?;

        let classification = ChangeClassifier::new(&rules, &loaded.schema)
            .classify(&changes, &FsFragments::new(&root));

        for (path, reason) in rejections(&classification.verdict) {
            warn!(path = %path, reason = %reason, "invalid changelog fragment");
        }
        info!(verdict = classification.verdict.name(), "changelog check finished");

        match cli.format {
            OutputFormat::Json => {
                let report = json_report(&classification, &loaded, &reference, &changes);
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    print_summary(&classification, &loaded, &reference);
                }
                print_verdict(&classification, cli.quiet);
            }
        }

        Ok(classification.verdict.exit_code())
    }
}

/// `(path, reason)` for every rejected fragment
fn rejections(verdict: &Verdict) -> Vec<(String, String)> {
    match verdict {
        Verdict::InvalidFragment(invalid) => invalid
            .iter()
            .map(|f| (f.path.clone(), f.issue.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

fn json_report(
    classification: &Classification,
    loaded: &LoadedSchema,
    reference: &str,
    changes: &ChangeSet,
) -> serde_json::Value {
    let invalid: Vec<serde_json::Value> = rejections(&classification.verdict)
        .into_iter()
        .map(|(path, reason)| serde_json::json!({ "path": path, "reason": reason }))
        .collect();

    serde_json::json!({
        "verdict": classification.verdict.name(),
        "passed": classification.verdict.is_success(),
        "reference": reference,
        "supplied_fragments": classification.supplied_fragments,
        "invalid_fragments": invalid,
        "schema_source": loaded.source.to_string(),
        "changes": changes,
    })
}

fn print_summary(classification: &Classification, loaded: &LoadedSchema, reference: &str) {
    println!("{}", output::header("Changelog Check"));
    println!();
    println!("{}", output::key_value("Compared against", reference));
    println!("{}", output::key_value("Schema", &loaded.source.to_string()));
    if !classification.supplied_fragments.is_empty() {
        println!(
            "{}",
            output::key_value("Fragments", &classification.supplied_fragments.join(", "))
        );
    }
    println!();
}

/// Print the outcome; failures are printed even when quiet
fn print_verdict(classification: &Classification, quiet: bool) {
    match &classification.verdict {
        Verdict::Pass if !quiet => output::success("Changelog check passed"),
        Verdict::ReleaseDetected if !quiet => {
            output::info("Release detected; changelog fragments are not checked")
        }
        Verdict::NotRequired if !quiet => output::info(NOT_REQUIRED_NOTE),
        Verdict::MissingFragment => {
            output::error(MISSING_FRAGMENT_HINT);
            for path in &classification.unit_changes {
                eprintln!("  {} {}", style("•").dim(), output::path_style().apply_to(path));
            }
        }
        Verdict::InvalidFragment(invalid) => {
            output::error(&format!("{} invalid changelog fragment(s)", invalid.len()));
            for fragment in invalid {
                eprintln!(
                    "  {} {}: {}",
                    style("✗").red(),
                    output::path_style().apply_to(&fragment.path),
                    fragment.issue
                );
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use gantry_changelog::{ChangelogSchema, FragmentIssue, InvalidFragment, SchemaSource};
    use gantry_git::ChangeStatus;

    use crate::exit_codes;

    fn loaded() -> LoadedSchema {
        LoadedSchema {
            schema: ChangelogSchema::default(),
            source: SchemaSource::Default {
                reason: "missing".to_string(),
            },
        }
    }

    fn classification(verdict: Verdict) -> Classification {
        Classification {
            verdict,
            supplied_fragments: vec!["changelogs/fragments/foo.yml".to_string()],
            unit_changes: Vec::new(),
            documentation_changes: Vec::new(),
        }
    }

    #[test]
    fn test_json_report_invalid() {
        let verdict = Verdict::InvalidFragment(vec![InvalidFragment {
            path: "changelogs/fragments/foo.yml".to_string(),
            issue: FragmentIssue::UnknownSection {
                key: "not_a_real_section".to_string(),
            },
        }]);
        let changes = ChangeSet::new().with(ChangeStatus::Added, "changelogs/fragments/foo.yml");

        let report = json_report(&classification(verdict), &loaded(), "origin/main", &changes);
        assert_eq!(report["verdict"], "invalid_fragment");
        assert_eq!(report["passed"], false);
        assert_eq!(report["reference"], "origin/main");
        assert_eq!(
            report["invalid_fragments"][0]["path"],
            "changelogs/fragments/foo.yml"
        );
        assert!(report["invalid_fragments"][0]["reason"]
            .as_str()
            .unwrap()
            .contains("not_a_real_section"));
        assert_eq!(report["changes"]["A"][0], "changelogs/fragments/foo.yml");
    }

    #[test]
    fn test_json_report_pass() {
        let report = json_report(
            &classification(Verdict::Pass),
            &loaded(),
            "origin/main",
            &ChangeSet::new(),
        );
        assert_eq!(report["verdict"], "pass");
        assert_eq!(report["passed"], true);
        assert!(report["invalid_fragments"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_failing_verdicts_exit_nonzero() {
        assert_eq!(Verdict::Pass.exit_code(), exit_codes::SUCCESS);
        assert_eq!(Verdict::NotRequired.exit_code(), exit_codes::SUCCESS);
        assert_ne!(Verdict::MissingFragment.exit_code(), exit_codes::SUCCESS);
        assert_ne!(
            Verdict::InvalidFragment(Vec::new()).exit_code(),
            exit_codes::SUCCESS
        );
    }

    #[test]
    fn test_check_arguments() {
        let cli = Cli::try_parse_from([
            "gantry", "changelog", "check", "--ref", "stable-2", "--remote", "upstream",
            "--backend", "libgit2",
        ])
        .unwrap();
        let crate::cli::Commands::Changelog(cmd) = cli.command else {
            panic!("expected changelog command");
        };
        let ChangelogSubcommand::Check(check) = cmd.command;
        assert_eq!(check.reference, "stable-2");
        assert_eq!(check.remote.as_deref(), Some("upstream"));
        assert_eq!(check.backend, DiffBackend::Libgit2);
    }

    #[test]
    fn test_ref_is_required() {
        assert!(Cli::try_parse_from(["gantry", "changelog", "check"]).is_err());
    }
}
