//! Generated YAML documents

use std::path::{Path, PathBuf};

use gantry_core::error::{Result, TemplateError};
use serde::Serialize;

/// A document the builder renders to YAML and writes to disk
pub trait Document: Serialize {
    /// File name, relative to the output directory
    fn file_name(&self) -> String;

    /// Render the document
    fn render(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the document into `base_dir`, returning the written path
    fn write_to(&self, base_dir: &Path) -> Result<PathBuf> {
        let content = self.render()?;
        let path = base_dir.join(self.file_name());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TemplateError::WriteFailed {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        std::fs::write(&path, content).map_err(|e| TemplateError::WriteFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        Ok(path)
    }
}
