//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_DOC_PREFIXES, DEFAULT_RELEASE_FILES, DEFAULT_UNIT_PREFIXES, FRAGMENT_EXTENSIONS,
};

/// Main configuration for Gantry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema")]
    pub schema: Option<String>,

    /// Changelog fragment check configuration
    pub changelog: ChangelogCheckConfig,

    /// Backstage template generation configuration
    pub templates: TemplatesConfig,
}

/// Changelog fragment check configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogCheckConfig {
    /// Remote whose branch is used as the comparison ref.
    /// An empty string means the ref is used verbatim.
    pub remote: String,

    /// Location of the antsibull-style changelog config (section names)
    pub schema_path: PathBuf,

    /// Directory holding changelog fragments
    pub fragments_dir: String,

    /// Accepted fragment file extensions (without the dot)
    pub fragment_extensions: Vec<String>,

    /// Files a release commit is allowed to modify
    pub release_files: Vec<String>,

    /// Path prefixes identifying distributable units
    pub unit_prefixes: Vec<String>,

    /// Path prefixes identifying documentation
    pub doc_prefixes: Vec<String>,
}

impl Default for ChangelogCheckConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            schema_path: PathBuf::from("changelogs/config.yaml"),
            fragments_dir: "changelogs/fragments".to_string(),
            fragment_extensions: to_strings(FRAGMENT_EXTENSIONS),
            release_files: to_strings(DEFAULT_RELEASE_FILES),
            unit_prefixes: to_strings(DEFAULT_UNIT_PREFIXES),
            doc_prefixes: to_strings(DEFAULT_DOC_PREFIXES),
        }
    }
}

impl ChangelogCheckConfig {
    /// The ref to diff against for a given base branch/tag/commit
    pub fn comparison_ref(&self, base: &str) -> String {
        if self.remote.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", self.remote, base)
        }
    }
}

/// Backstage template generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Directory containing one subdirectory per automation experience
    pub experiences_dir: PathBuf,

    /// Directory receiving generated template documents
    pub output_dir: PathBuf,

    /// Path of the location manifest listing every template
    pub manifest_file: PathBuf,

    /// Experience name used in the manifest metadata
    pub experience_name: String,

    /// Owner recorded in each template spec
    pub owner: String,

    /// System recorded in each template spec
    pub system: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            experiences_dir: PathBuf::from("extensions/experiences"),
            output_dir: PathBuf::from("templates"),
            manifest_file: PathBuf::from("all_ansible_automation_experience_templates.yaml"),
            experience_name: "ansible".to_string(),
            owner: "ansible-authors".to_string(),
            system: "ansible".to_string(),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_ref_with_remote() {
        let config = ChangelogCheckConfig::default();
        assert_eq!(config.comparison_ref("main"), "origin/main");
    }

    #[test]
    fn test_comparison_ref_without_remote() {
        let config = ChangelogCheckConfig {
            remote: String::new(),
            ..Default::default()
        };
        assert_eq!(config.comparison_ref("v1.2.0"), "v1.2.0");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config =
            serde_yaml::from_str("changelog:\n  remote: upstream\n").unwrap();
        assert_eq!(config.changelog.remote, "upstream");
        assert_eq!(config.changelog.fragments_dir, "changelogs/fragments");
        assert_eq!(config.templates.experience_name, "ansible");
    }
}
