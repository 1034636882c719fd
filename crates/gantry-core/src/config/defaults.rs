//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "gantry.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "gantry.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".gantry.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".gantry.toml",
    ]
}

/// Extensions a changelog fragment may carry
pub const FRAGMENT_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Files touched by an automated collection release
pub const DEFAULT_RELEASE_FILES: &[&str] =
    &["CHANGELOG.rst", "changelogs/changelog.yaml", "galaxy.yml"];

/// Prefixes of paths that belong to a shipped module, plugin, role or playbook
pub const DEFAULT_UNIT_PREFIXES: &[&str] = &[
    "plugins/modules",
    "plugins/module_utils",
    "plugins/action",
    "plugins/inventory",
    "plugins/lookup",
    "plugins/filter",
    "plugins/connection",
    "plugins/become",
    "plugins/cache",
    "plugins/callback",
    "plugins/cliconf",
    "plugins/httpapi",
    "plugins/netconf",
    "plugins/shell",
    "plugins/strategy",
    "plugins/terminal",
    "plugins/test",
    "plugins/vars",
    "roles/",
    "playbooks/",
    "meta/runtime.yml",
];

/// Prefixes of documentation-only paths
pub const DEFAULT_DOC_PREFIXES: &[&str] = &["docs/", "plugins/doc_fragments"];

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Gantry Configuration

changelog:
  remote: origin
  schema_path: changelogs/config.yaml
  fragments_dir: changelogs/fragments
  fragment_extensions: [yaml, yml]
  release_files:
    - CHANGELOG.rst
    - changelogs/changelog.yaml
    - galaxy.yml
  doc_prefixes:
    - docs/
    - plugins/doc_fragments

templates:
  experiences_dir: extensions/experiences
  output_dir: templates
  manifest_file: all_ansible_automation_experience_templates.yaml
  experience_name: ansible
  owner: ansible-authors
  system: ansible
"#;
