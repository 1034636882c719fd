//! Experience discovery

use std::path::{Path, PathBuf};

use gantry_core::error::{Result, TemplateError};
use serde::Deserialize;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Setup document inside each experience
pub const SETUP_FILE: &str = "setup.yml";

/// Directory holding exported survey specifications
pub const SURVEYS_DIR: &str = "playbooks/template_surveys";

/// One experience directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Experience {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct SetupDocument {
    #[serde(default)]
    controller_templates: Vec<serde_yaml::Value>,
}

impl Experience {
    pub fn setup_path(&self) -> PathBuf {
        self.path.join(SETUP_FILE)
    }

    pub fn surveys_dir(&self) -> PathBuf {
        self.path.join(SURVEYS_DIR)
    }

    /// Survey references declared by the setup document's controller
    /// templates.
    ///
    /// Entries without a `survey_spec` get an `unnamed_survey_<n>`
    /// placeholder, numbered from 1 within this experience. A missing setup
    /// document declares nothing.
    pub fn survey_refs(&self) -> Result<Vec<String>> {
        let path = self.setup_path();
        if !path.is_file() {
            debug!(experience = %self.name, "no setup document");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path)?;
        let setup: Option<SetupDocument> =
            serde_yaml::from_str(&content).map_err(|e| TemplateError::SetupParse {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let mut unnamed = 0;
        let refs = setup
            .unwrap_or_default()
            .controller_templates
            .iter()
            .map(|entry| match entry.get("survey_spec").and_then(|v| v.as_str()) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => {
                    unnamed += 1;
                    format!("unnamed_survey_{}", unnamed)
                }
            })
            .collect();

        Ok(refs)
    }

    /// Survey specification files, sorted by name
    pub fn survey_files(&self) -> Vec<PathBuf> {
        let dir = self.surveys_dir();
        if !dir.is_dir() {
            return Vec::new();
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        files
    }
}

/// Find experience directories directly under `dir`, sorted by name
pub fn discover_experiences(dir: &Path) -> Result<Vec<Experience>> {
    if !dir.is_dir() {
        return Err(TemplateError::ExperiencesNotFound(dir.to_path_buf()).into());
    }

    let mut experiences: Vec<Experience> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| Experience {
            name: e.file_name().to_string_lossy().into_owned(),
            path: e.into_path(),
        })
        .collect();
    experiences.sort_by(|a, b| a.name.cmp(&b.name));

    info!(count = experiences.len(), "discovered experiences");
    Ok(experiences)
}
