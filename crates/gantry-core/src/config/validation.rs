//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    validate_templates(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    let changelog = &config.changelog;

    if changelog.fragments_dir.trim_matches('/').is_empty() {
        return Err(invalid("changelog.fragments_dir", "cannot be empty"));
    }

    if changelog.fragment_extensions.is_empty() {
        return Err(invalid(
            "changelog.fragment_extensions",
            "at least one extension is required",
        ));
    }

    for (i, ext) in changelog.fragment_extensions.iter().enumerate() {
        if ext.is_empty() || ext.starts_with('.') {
            return Err(invalid(
                &format!("changelog.fragment_extensions[{}]", i),
                "must be a non-empty extension without a leading dot",
            ));
        }
    }

    if changelog.unit_prefixes.is_empty() {
        return Err(invalid("changelog.unit_prefixes", "cannot be empty"));
    }

    for (field, list) in [
        ("changelog.release_files", &changelog.release_files),
        ("changelog.unit_prefixes", &changelog.unit_prefixes),
        ("changelog.doc_prefixes", &changelog.doc_prefixes),
    ] {
        if let Some(i) = list.iter().position(|entry| entry.is_empty()) {
            return Err(invalid(&format!("{}[{}]", field, i), "entries cannot be empty"));
        }
    }

    Ok(())
}

fn validate_templates(config: &Config) -> Result<()> {
    let templates = &config.templates;

    if templates.experiences_dir.as_os_str().is_empty() {
        return Err(invalid("templates.experiences_dir", "cannot be empty"));
    }

    if templates.output_dir.as_os_str().is_empty() {
        return Err(invalid("templates.output_dir", "cannot be empty"));
    }

    if templates.experience_name.is_empty() {
        return Err(invalid("templates.experience_name", "cannot be empty"));
    }

    Ok(())
}

fn invalid(field: &str, message: &str) -> crate::error::GantryError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_unit_prefixes() {
        let mut config = Config::default();
        config.changelog.unit_prefixes.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_dotted_extension() {
        let mut config = Config::default();
        config.changelog.fragment_extensions = vec![".yaml".to_string()];
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("fragment_extensions[0]"));
    }

    #[test]
    fn test_validate_empty_release_file_entry() {
        let mut config = Config::default();
        config.changelog.release_files.push(String::new());
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("changelog.release_files[3]"));
    }

    #[test]
    fn test_validate_empty_output_dir() {
        let mut config = Config::default();
        config.templates.output_dir = std::path::PathBuf::new();
        assert!(validate_config(&config).is_err());
    }
}
