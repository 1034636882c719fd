//! Error types for Gantry

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using GantryError
pub type Result<T> = std::result::Result<T, GantryError>;

/// Main error type for Gantry operations
#[derive(Debug, Error)]
pub enum GantryError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Template generation errors
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// The diff command could not be spawned
    #[error("Failed to run git: {0}")]
    SpawnFailed(String),

    /// The diff command exited unsuccessfully
    #[error("git diff against '{reference}' failed: {stderr}")]
    DiffFailed { reference: String, stderr: String },

    /// A reference could not be resolved to a tree
    #[error("Cannot resolve reference '{0}'")]
    UnknownReference(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Invalid path rule (e.g. a fragment pattern that does not compile)
    #[error("Invalid changelog path rule: {0}")]
    InvalidRule(String),

    /// Changelog config could not be parsed
    #[error("Failed to parse changelog config {path}: {source}")]
    SchemaParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Changelog config parsed but has an unexpected shape
    #[error("Invalid changelog config {path}: {message}")]
    SchemaShape { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Template generation errors
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Experiences directory is missing
    #[error("Experiences directory not found at {0}")]
    ExperiencesNotFound(PathBuf),

    /// A setup document could not be parsed
    #[error("Failed to parse setup document {path}: {reason}")]
    SetupParse { path: PathBuf, reason: String },

    /// A survey is missing a field the template needs
    #[error("Survey {path} is missing required field '{field}'")]
    MissingField { path: PathBuf, field: String },

    /// A survey name cannot be used as part of a file name
    #[error("Survey {path} has name '{name}' that cannot be used in a file name")]
    InvalidName { path: PathBuf, name: String },

    /// Failed to write a generated document
    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

impl GantryError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
