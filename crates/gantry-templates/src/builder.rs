//! Build every template and the manifest for a repository

use std::path::{Path, PathBuf};

use gantry_core::error::{Result, TemplateError};
use gantry_core::TemplatesConfig;
use tracing::{debug, info, instrument, warn};

use crate::document::Document;
use crate::experience::{discover_experiences, Experience};
use crate::manifest::{target_prefix, template_files, LocationManifest};
use crate::survey::SurveySpec;
use crate::template::Template;

/// Survey references harvested from one experience's setup document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperienceSurveys {
    pub experience: String,
    pub survey_refs: Vec<String>,
}

/// An input file that produced nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// What a build wrote, or would write in a dry run
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub experiences: Vec<ExperienceSurveys>,
    pub templates: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    pub manifest: PathBuf,
    pub manifest_targets: Vec<String>,
    pub dry_run: bool,
}

/// Builds Backstage templates from experience survey specifications
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    root: PathBuf,
    config: TemplatesConfig,
    dry_run: bool,
}

impl TemplateBuilder {
    /// Builder rooted at `root`; configured directories resolve against it
    pub fn new(root: impl Into<PathBuf>, config: TemplatesConfig) -> Self {
        Self {
            root: root.into(),
            config,
            dry_run: false,
        }
    }

    /// Report without writing anything
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn experiences_dir(&self) -> PathBuf {
        self.root.join(&self.config.experiences_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.config.output_dir)
    }

    #[instrument(skip(self), fields(root = %self.root.display(), dry_run = self.dry_run))]
    pub fn build(&self) -> Result<BuildReport> {
        let experiences = discover_experiences(&self.experiences_dir())?;
        let output_dir = self.output_dir();

        let mut report = BuildReport {
            dry_run: self.dry_run,
            ..BuildReport::default()
        };

        for experience in &experiences {
            match experience.survey_refs() {
                Ok(survey_refs) => {
                    debug!(experience = %experience.name, count = survey_refs.len(), "harvested survey references");
                    report.experiences.push(ExperienceSurveys {
                        experience: experience.name.clone(),
                        survey_refs,
                    });
                }
                Err(e) => {
                    warn!(experience = %experience.name, error = %e, "skipping setup document");
                    report.skipped.push(SkippedFile {
                        path: experience.setup_path(),
                        reason: e.to_string(),
                    });
                }
            }

            for path in experience.survey_files() {
                match self.build_template(experience, &path) {
                    Ok(template) => {
                        let target = output_dir.join(template.file_name());
                        if !self.dry_run {
                            template.write_to(&output_dir)?;
                        }
                        info!(path = %target.display(), "generated template");
                        report.templates.push(target);
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping survey");
                        report.skipped.push(SkippedFile {
                            path,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        let manifest = if self.dry_run {
            self.planned_manifest(&output_dir, &report.templates)
        } else {
            LocationManifest::scan(
                &output_dir,
                &self.config.manifest_file,
                &self.config.experience_name,
            )
        };

        report.manifest = self.root.join(manifest.file_name());
        report.manifest_targets = manifest.spec.targets.clone();
        if !self.dry_run {
            manifest.write_to(&self.root)?;
        }
        info!(
            path = %report.manifest.display(),
            targets = report.manifest_targets.len(),
            "generated manifest"
        );

        Ok(report)
    }

    fn build_template(&self, experience: &Experience, path: &Path) -> Result<Template> {
        let content = std::fs::read_to_string(path)?;
        let survey: SurveySpec = serde_json::from_str(&content)?;

        let template = Template::from_survey(&experience.name, &survey, &self.config).ok_or_else(
            || TemplateError::MissingField {
                path: path.to_path_buf(),
                field: "name".to_string(),
            },
        )?;

        if !is_file_name_safe(&template.metadata.name) {
            return Err(TemplateError::InvalidName {
                path: path.to_path_buf(),
                name: survey.name.unwrap_or_default(),
            }
            .into());
        }
        Ok(template)
    }

    /// Manifest as it would look after writing `planned` into `output_dir`
    fn planned_manifest(&self, output_dir: &Path, planned: &[PathBuf]) -> LocationManifest {
        let mut names = template_files(output_dir);
        names.extend(
            planned
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned()),
        );
        names.sort();
        names.dedup();

        let prefix = target_prefix(output_dir);
        let targets = names
            .into_iter()
            .map(|name| format!("{}/{}", prefix, name))
            .collect();

        LocationManifest::new(
            &self.config.manifest_file,
            &self.config.experience_name,
            targets,
        )
    }
}

/// Slugs end up inside a file name under the output directory
fn is_file_name_safe(slug: &str) -> bool {
    !slug.is_empty() && !slug.contains(['/', '\\']) && !slug.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VM_SURVEY: &str = r#"{
        "name": "Create RHEL VM",
        "description": "Provision a VM",
        "spec": [
            {
                "variable": "vm_name",
                "question_name": "VM name",
                "question_description": "Name of the VM",
                "type": "text",
                "min": 1,
                "max": 64,
                "required": true
            }
        ]
    }"#;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(
            root,
            "extensions/experiences/rhel/setup.yml",
            "controller_templates:\n  - survey_spec: Create RHEL VM\n  - name: other\n",
        );
        write(
            root,
            "extensions/experiences/rhel/playbooks/template_surveys/vm.json",
            VM_SURVEY,
        );
        write(
            root,
            "extensions/experiences/rhel/playbooks/template_surveys/broken.json",
            "{ not json",
        );
        write(
            root,
            "extensions/experiences/windows/playbooks/template_surveys/patch.json",
            r#"{"name": "Patch Windows", "spec": []}"#,
        );
        temp
    }

    #[test]
    fn test_build_writes_templates_and_manifest() {
        let temp = fixture();
        let report = TemplateBuilder::new(temp.path(), TemplatesConfig::default())
            .build()
            .unwrap();

        let out = temp.path().join("templates");
        assert!(out
            .join("automation_experience_rhel_Create_RHEL_VM_template.yaml")
            .is_file());
        assert!(out
            .join("automation_experience_windows_Patch_Windows_template.yaml")
            .is_file());
        assert_eq!(report.templates.len(), 2);

        let manifest_path = temp
            .path()
            .join("all_ansible_automation_experience_templates.yaml");
        assert_eq!(report.manifest, manifest_path);
        let manifest: serde_yaml::Value =
            serde_yaml::from_str(&std::fs::read_to_string(&manifest_path).unwrap()).unwrap();
        assert_eq!(manifest["kind"], "Location");
        assert_eq!(
            manifest["spec"]["targets"],
            serde_yaml::to_value(vec![
                "./templates/automation_experience_rhel_Create_RHEL_VM_template.yaml",
                "./templates/automation_experience_windows_Patch_Windows_template.yaml",
            ])
            .unwrap()
        );
    }

    #[test]
    fn test_invalid_json_is_skipped() {
        let temp = fixture();
        let report = TemplateBuilder::new(temp.path(), TemplatesConfig::default())
            .build()
            .unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].path.ends_with("broken.json"));
    }

    #[test]
    fn test_survey_refs_reported_per_experience() {
        let temp = fixture();
        let report = TemplateBuilder::new(temp.path(), TemplatesConfig::default())
            .build()
            .unwrap();

        assert_eq!(
            report.experiences,
            vec![
                ExperienceSurveys {
                    experience: "rhel".to_string(),
                    survey_refs: vec![
                        "Create RHEL VM".to_string(),
                        "unnamed_survey_1".to_string()
                    ],
                },
                ExperienceSurveys {
                    experience: "windows".to_string(),
                    survey_refs: Vec::new(),
                },
            ]
        );
    }

    #[test]
    fn test_manifest_lists_existing_files() {
        let temp = fixture();
        write(temp.path(), "templates/handwritten.yml", "kind: Template\n");

        let report = TemplateBuilder::new(temp.path(), TemplatesConfig::default())
            .build()
            .unwrap();
        assert_eq!(report.manifest_targets.len(), 3);
        assert!(report
            .manifest_targets
            .contains(&"./templates/handwritten.yml".to_string()));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = fixture();
        let report = TemplateBuilder::new(temp.path(), TemplatesConfig::default())
            .dry_run(true)
            .build()
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.templates.len(), 2);
        assert_eq!(report.manifest_targets.len(), 2);
        assert!(!temp.path().join("templates").exists());
        assert!(!report.manifest.exists());
    }

    #[test]
    fn test_nameless_survey_is_skipped() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "extensions/experiences/misc/playbooks/template_surveys/anon.json",
            r#"{"spec": []}"#,
        );

        let report = TemplateBuilder::new(temp.path(), TemplatesConfig::default())
            .build()
            .unwrap();
        assert!(report.templates.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].reason.contains("name"));
    }

    #[test]
    fn test_missing_experiences_dir_fails() {
        let temp = TempDir::new().unwrap();
        let result = TemplateBuilder::new(temp.path(), TemplatesConfig::default()).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_directories() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "surveys/demo/playbooks/template_surveys/s.json",
            r#"{"name": "Demo", "spec": []}"#,
        );
        let config = TemplatesConfig {
            experiences_dir: "surveys".into(),
            output_dir: "backstage".into(),
            manifest_file: "catalog.yaml".into(),
            experience_name: "demo".into(),
            ..TemplatesConfig::default()
        };

        let report = TemplateBuilder::new(temp.path(), config).build().unwrap();
        assert_eq!(
            report.manifest_targets,
            vec!["./backstage/automation_experience_demo_Demo_template.yaml"]
        );
        let manifest = std::fs::read_to_string(temp.path().join("catalog.yaml")).unwrap();
        assert!(manifest.contains("software-template-for-automation-experience-demo"));
    }

    #[test]
    fn test_survey_name_with_path_separator_is_skipped() {
        let temp = fixture();
        write(
            temp.path(),
            "extensions/experiences/web/playbooks/template_surveys/apache.json",
            r#"{"name": "Install Apache/Nginx", "spec": []}"#,
        );
        write(
            temp.path(),
            "extensions/experiences/web/playbooks/template_surveys/escape.json",
            r#"{"name": "../../outside", "spec": []}"#,
        );

        let report = TemplateBuilder::new(temp.path(), TemplatesConfig::default())
            .build()
            .unwrap();

        let skipped: Vec<_> = report
            .skipped
            .iter()
            .filter_map(|s| s.path.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert!(skipped.contains(&"apache.json".to_string()));
        assert!(skipped.contains(&"escape.json".to_string()));

        let out = temp.path().join("templates");
        assert!(!out.join("automation_experience_web_Install_Apache").exists());
        assert!(!out.join("outside_template.yaml").exists());
        assert!(!temp.path().join("outside_template.yaml").exists());
        assert_eq!(report.templates.len(), 2);
        assert!(report.templates.iter().all(|p| p.parent() == Some(out.as_path())));
        assert_eq!(report.manifest_targets.len(), report.templates.len());
    }

    #[test]
    fn test_file_name_safety() {
        assert!(is_file_name_safe("Create_RHEL_VM"));
        assert!(is_file_name_safe("v1.2_upgrade"));
        assert!(!is_file_name_safe(""));
        assert!(!is_file_name_safe("Install_Apache/Nginx"));
        assert!(!is_file_name_safe("a\\b"));
        assert!(!is_file_name_safe("..hidden"));
    }
}
