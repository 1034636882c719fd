//! Path classification tables
//!
//! Which paths are fragments, which belong to a release commit, which belong
//! to a distributable unit and which are documentation. The lists themselves
//! live in configuration; this module only answers questions about paths.

use regex::Regex;

use gantry_core::config::ChangelogCheckConfig;
use gantry_core::error::ChangelogError;

/// Compiled path rules for one check
#[derive(Debug, Clone)]
pub struct PathRules {
    fragment_pattern: Regex,
    release_files: Vec<String>,
    unit_prefixes: Vec<String>,
    doc_prefixes: Vec<String>,
}

impl PathRules {
    /// Build rules from configuration
    pub fn new(config: &ChangelogCheckConfig) -> Result<Self, ChangelogError> {
        let dir = config.fragments_dir.trim_end_matches('/');
        let extensions = config
            .fragment_extensions
            .iter()
            .map(|ext| regex::escape(ext))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"^{}/(.*)\.({})$", regex::escape(dir), extensions);

        let fragment_pattern = Regex::new(&pattern)
            .map_err(|e| ChangelogError::InvalidRule(format!("{}: {}", pattern, e)))?;

        Ok(Self {
            fragment_pattern,
            release_files: config.release_files.clone(),
            unit_prefixes: config.unit_prefixes.clone(),
            doc_prefixes: config.doc_prefixes.clone(),
        })
    }

    /// Rules for the stock collection layout
    pub fn standard() -> Result<Self, ChangelogError> {
        Self::new(&ChangelogCheckConfig::default())
    }

    /// Whether `path` is a changelog fragment (`changelogs/fragments/<name>.yml`)
    pub fn is_fragment(&self, path: &str) -> bool {
        self.fragment_pattern.is_match(path)
    }

    /// Whether `path` is one of the files a release commit rewrites
    pub fn is_release_file(&self, path: &str) -> bool {
        self.release_files.iter().any(|f| f == path)
    }

    /// Whether `path` belongs to a module, plugin, role or playbook
    pub fn is_distributable_unit(&self, path: &str) -> bool {
        self.unit_prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }

    /// Whether `path` is documentation
    pub fn is_documentation(&self, path: &str) -> bool {
        self.doc_prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }

    /// Source of the fragment regex
    pub fn fragment_pattern(&self) -> &str {
        self.fragment_pattern.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> PathRules {
        PathRules::standard().unwrap()
    }

    #[test]
    fn test_fragment_paths() {
        let rules = rules();
        assert!(rules.is_fragment("changelogs/fragments/fix-foo.yml"));
        assert!(rules.is_fragment("changelogs/fragments/fix-foo.yaml"));
        assert!(rules.is_fragment("changelogs/fragments/nested/fix.yml"));
        assert!(!rules.is_fragment("changelogs/fragments/fix-foo.txt"));
        assert!(!rules.is_fragment("changelogs/fragments/fix-yml"));
        assert!(!rules.is_fragment("changelogs/changelog.yaml"));
        assert!(!rules.is_fragment("x/changelogs/fragments/fix.yml"));
    }

    #[test]
    fn test_fragment_dir_is_escaped() {
        let config = ChangelogCheckConfig {
            fragments_dir: "change.logs/frags/".to_string(),
            fragment_extensions: vec!["yml".to_string()],
            ..Default::default()
        };
        let rules = PathRules::new(&config).unwrap();
        assert!(rules.is_fragment("change.logs/frags/a.yml"));
        assert!(!rules.is_fragment("changeXlogs/frags/a.yml"));
        assert!(!rules.is_fragment("change.logs/frags/a.yaml"));
    }

    #[test]
    fn test_release_files() {
        let rules = rules();
        assert!(rules.is_release_file("CHANGELOG.rst"));
        assert!(rules.is_release_file("changelogs/changelog.yaml"));
        assert!(rules.is_release_file("galaxy.yml"));
        assert!(!rules.is_release_file("README.md"));
        assert!(!rules.is_release_file("docs/CHANGELOG.rst"));
    }

    #[test]
    fn test_distributable_units() {
        let rules = rules();
        for path in [
            "plugins/modules/foo.py",
            "plugins/module_utils/common.py",
            "plugins/action/foo.py",
            "plugins/lookup/bar.py",
            "plugins/connection/ssh.py",
            "roles/setup/tasks/main.yml",
            "playbooks/deploy.yml",
            "meta/runtime.yml",
        ] {
            assert!(rules.is_distributable_unit(path), "{path}");
        }

        for path in [
            "docs/index.md",
            "plugins/doc_fragments/common.py",
            "tests/unit/test_foo.py",
            "meta/execution-environment.yml",
            "README.md",
        ] {
            assert!(!rules.is_distributable_unit(path), "{path}");
        }
    }

    #[test]
    fn test_documentation() {
        let rules = rules();
        assert!(rules.is_documentation("docs/guide.rst"));
        assert!(rules.is_documentation("plugins/doc_fragments/auth.py"));
        assert!(!rules.is_documentation("plugins/modules/foo.py"));
    }
}
