//! Changelog fragment validation

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;
use tracing::debug;

use crate::schema::ChangelogSchema;

/// Why a fragment was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragmentIssue {
    /// The file could not be read
    #[error("cannot read file: {0}")]
    Unreadable(String),

    /// The file is not valid YAML
    #[error("yaml loading error: {0}")]
    Malformed(String),

    /// A document is something other than a mapping of sections
    #[error("document {document} must be a mapping of sections, '{found}' found instead")]
    NotAMapping { document: usize, found: &'static str },

    /// A top-level key is not a recognized section
    #[error("{key} is not a valid changelog type")]
    UnknownSection { key: String },

    /// The summary section holds something other than prose
    #[error("changelog section {key} must be a string, '{found}' found instead")]
    SummaryNotString { key: String, found: &'static str },

    /// A regular section holds something other than a list
    #[error("changelog section {key} must be a list, '{found}' found instead")]
    SectionNotList { key: String, found: &'static str },
}

/// A rejected fragment and the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFragment {
    pub path: String,
    pub issue: FragmentIssue,
}

impl fmt::Display for InvalidFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.issue)
    }
}

/// Reads fragment contents by repository-relative path
pub trait FragmentSource {
    fn read(&self, path: &str) -> std::io::Result<String>;
}

/// Reads fragments from a checkout on disk
#[derive(Debug, Clone)]
pub struct FsFragments {
    root: PathBuf,
}

impl FsFragments {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FragmentSource for FsFragments {
    fn read(&self, path: &str) -> std::io::Result<String> {
        std::fs::read_to_string(self.root.join(path))
    }
}

impl FragmentSource for HashMap<String, String> {
    fn read(&self, path: &str) -> std::io::Result<String> {
        self.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("{} not found", path))
        })
    }
}

/// Read and validate the fragment at `path`
pub fn validate_fragment(
    path: &str,
    source: &dyn FragmentSource,
    schema: &ChangelogSchema,
) -> Result<(), InvalidFragment> {
    let reject = |issue| InvalidFragment {
        path: path.to_string(),
        issue,
    };

    let content = source
        .read(path)
        .map_err(|e| reject(FragmentIssue::Unreadable(e.to_string())))?;

    validate_fragment_str(&content, schema).map_err(reject)?;
    debug!(path, "fragment is valid");
    Ok(())
}

/// Validate fragment text: every YAML document must map recognized
/// sections to lists, except the summary section which maps to a string.
pub fn validate_fragment_str(content: &str, schema: &ChangelogSchema) -> Result<(), FragmentIssue> {
    let documents = parse_documents(content).map_err(|e| FragmentIssue::Malformed(e.to_string()))?;

    for (index, document) in documents.iter().enumerate() {
        validate_document(index, document, schema)?;
    }

    Ok(())
}

fn parse_documents(content: &str) -> Result<Vec<Value>, serde_yaml::Error> {
    serde_yaml::Deserializer::from_str(content)
        .map(Value::deserialize)
        .collect()
}

fn validate_document(
    index: usize,
    document: &Value,
    schema: &ChangelogSchema,
) -> Result<(), FragmentIssue> {
    let sections = match document {
        // An empty document declares nothing.
        Value::Null => return Ok(()),
        Value::Mapping(sections) => sections,
        other => {
            return Err(FragmentIssue::NotAMapping {
                document: index,
                found: type_name(other),
            })
        }
    };

    for (key, value) in sections {
        let key = key_name(key);

        if !schema.is_recognized(&key) {
            return Err(FragmentIssue::UnknownSection { key });
        }

        if schema.is_summary(&key) {
            if !value.is_string() {
                return Err(FragmentIssue::SummaryNotString {
                    key,
                    found: type_name(value),
                });
            }
        } else if !value.is_sequence() {
            return Err(FragmentIssue::SectionNotList {
                key,
                found: type_name(value),
            });
        }
    }

    Ok(())
}

fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "dict",
        Value::Tagged(_) => "tagged",
    }
}
