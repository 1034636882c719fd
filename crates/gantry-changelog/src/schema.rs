//! Changelog section schema
//!
//! The recognized fragment sections come from the collection's antsibull
//! changelog config (`changelogs/config.yaml`). When that file is missing or
//! unusable the stock antsibull categories are used instead, so an absent
//! config never rejects an otherwise valid fragment.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use gantry_core::error::ChangelogError;

/// Stock antsibull-changelog fragment categories
pub const DEFAULT_SECTIONS: &[&str] = &[
    "release_summary",
    "breaking_changes",
    "major_changes",
    "minor_changes",
    "removed_features",
    "deprecated_features",
    "security_fixes",
    "bugfixes",
    "known_issues",
    "trivial",
];

/// Stock name of the section for changes not worth a changelog line
pub const DEFAULT_TRIVIAL_SECTION: &str = "trivial";

/// Stock name of the prose summary section
pub const DEFAULT_SUMMARY_SECTION: &str = "release_summary";

/// Recognized fragment sections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogSchema {
    sections: Vec<String>,
    trivial: String,
    summary: String,
}

impl ChangelogSchema {
    /// Build a schema. The trivial and summary sections are recognized even
    /// if `sections` does not list them.
    pub fn new(
        sections: impl IntoIterator<Item = impl Into<String>>,
        trivial: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        let trivial = trivial.into();
        let summary = summary.into();

        let mut all: Vec<String> = Vec::new();
        let names = sections
            .into_iter()
            .map(Into::into)
            .chain([trivial.clone(), summary.clone()]);
        for name in names {
            if !all.contains(&name) {
                all.push(name);
            }
        }

        Self {
            sections: all,
            trivial,
            summary,
        }
    }

    /// Whether `name` is a valid top-level fragment key
    pub fn is_recognized(&self, name: &str) -> bool {
        self.sections.iter().any(|s| s == name)
    }

    /// Whether `name` is the prose summary section (a string, not a list)
    pub fn is_summary(&self, name: &str) -> bool {
        self.summary == name
    }

    /// All recognized section names, in config order
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Name of the trivial section
    pub fn trivial_section(&self) -> &str {
        &self.trivial
    }

    /// Name of the summary section
    pub fn summary_section(&self) -> &str {
        &self.summary
    }
}

impl Default for ChangelogSchema {
    fn default() -> Self {
        Self::new(
            DEFAULT_SECTIONS.iter().copied(),
            DEFAULT_TRIVIAL_SECTION,
            DEFAULT_SUMMARY_SECTION,
        )
    }
}

/// Where a schema came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// Read from the collection's changelog config
    File(PathBuf),
    /// Stock sections, because the config could not be used
    Default {
        /// Why the config was not used
        reason: String,
    },
}

impl std::fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Default { .. } => write!(f, "default sections"),
        }
    }
}

/// A schema together with its provenance
#[derive(Debug, Clone)]
pub struct LoadedSchema {
    pub schema: ChangelogSchema,
    pub source: SchemaSource,
}

#[derive(Debug, Deserialize)]
struct ChangelogConfigDocument {
    sections: Vec<Vec<serde_yaml::Value>>,
    trivial_section_name: String,
    prelude_section_name: String,
}

/// Load the schema from an antsibull changelog config.
///
/// Never fails: any read, parse or shape problem falls back to
/// [`ChangelogSchema::default`] and the cause is kept in the returned
/// [`SchemaSource::Default`].
pub fn load_schema(path: &Path) -> LoadedSchema {
    match read_schema(path) {
        Ok(schema) => {
            info!(
                path = %path.display(),
                sections = ?schema.sections(),
                "found changelog sections"
            );
            LoadedSchema {
                schema,
                source: SchemaSource::File(path.to_path_buf()),
            }
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "failed to read changelog config, using default sections instead"
            );
            LoadedSchema {
                schema: ChangelogSchema::default(),
                source: SchemaSource::Default {
                    reason: e.to_string(),
                },
            }
        }
    }
}

fn read_schema(path: &Path) -> Result<ChangelogSchema, ChangelogError> {
    let content = std::fs::read_to_string(path)?;
    let document: ChangelogConfigDocument =
        serde_yaml::from_str(&content).map_err(|source| ChangelogError::SchemaParse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut names = Vec::with_capacity(document.sections.len());
    for (i, entry) in document.sections.iter().enumerate() {
        let name = entry.first().and_then(|v| v.as_str()).ok_or_else(|| {
            ChangelogError::SchemaShape {
                path: path.to_path_buf(),
                message: format!("sections[{}] must start with a section name", i),
            }
        })?;
        names.push(name.to_string());
    }

    Ok(ChangelogSchema::new(
        names,
        document.trivial_section_name,
        document.prelude_section_name,
    ))
}
