//! Backstage Location manifest listing generated templates

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::document::Document;

pub const LOCATION_API_VERSION: &str = "backstage.io/v1alpha1";
pub const LOCATION_DESCRIPTION: &str = "A collection of all Ansible templates";

/// A `Location` entity pointing at every template file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationManifest {
    pub api_version: String,
    pub kind: String,
    pub metadata: LocationMetadata,
    pub spec: LocationSpec,
    #[serde(skip)]
    file_name: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationMetadata {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationSpec {
    pub targets: Vec<String>,
}

impl LocationManifest {
    pub fn new(file_name: impl Into<PathBuf>, experience_name: &str, targets: Vec<String>) -> Self {
        Self {
            api_version: LOCATION_API_VERSION.to_string(),
            kind: "Location".to_string(),
            metadata: LocationMetadata {
                name: format!(
                    "software-template-for-automation-experience-{}",
                    experience_name
                ),
                description: LOCATION_DESCRIPTION.to_string(),
            },
            spec: LocationSpec { targets },
            file_name: file_name.into(),
        }
    }

    /// Build the manifest from what is currently in `output_dir`.
    ///
    /// Targets are written relative to the manifest, which sits next to the
    /// output directory, as `./<output_dir_name>/<file>`.
    pub fn scan(output_dir: &Path, file_name: impl Into<PathBuf>, experience_name: &str) -> Self {
        let prefix = target_prefix(output_dir);
        let targets = template_files(output_dir)
            .into_iter()
            .map(|name| format!("{}/{}", prefix, name))
            .collect();

        Self::new(file_name, experience_name, targets)
    }
}

impl Document for LocationManifest {
    fn file_name(&self) -> String {
        self.file_name.to_string_lossy().into_owned()
    }
}

/// `./<dir name>`, the prefix targets are listed under
pub fn target_prefix(output_dir: &Path) -> String {
    let name = output_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "templates".to_string());
    format!("./{}", name)
}

/// Sorted names of YAML files directly inside `dir`
pub fn template_files(dir: &Path) -> Vec<String> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut names: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".yaml") || name.ends_with(".yml"))
        .collect();
    names.sort();
    names
}
