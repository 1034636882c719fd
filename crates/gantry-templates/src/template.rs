//! Backstage software templates built from surveys

use gantry_core::TemplatesConfig;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::document::Document;
use crate::mapping::backstage_type;
use crate::survey::{SurveyQuestion, SurveySpec};

pub const TEMPLATE_API_VERSION: &str = "scaffolder.backstage.io/v1beta3";
pub const TEMPLATE_TAGS: &[&str] = &["recommended", "ansible"];
pub const PARAMETERS_TITLE: &str = "Provide information about the new component";
pub const STEP_ID: &str = "ansible";
pub const STEP_NAME: &str = "Generating the Ansible Source Code Component";
pub const STEP_ACTION: &str = "ansible:rhaap:sync";
pub const APPLICATION_TYPE: &str = "collection-project";

/// A `scaffolder.backstage.io` Template document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub api_version: String,
    pub kind: String,
    pub metadata: TemplateMetadata,
    pub spec: TemplateSpec,
    #[serde(skip)]
    experience: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateMetadata {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateSpec {
    pub owner: String,
    pub system: String,
    #[serde(rename = "type")]
    pub template_type: String,
    pub parameters: Vec<ParameterBlock>,
    pub steps: Vec<Step>,
}

/// One page of the template form
#[derive(Debug, Clone, Serialize)]
pub struct ParameterBlock {
    pub title: String,
    pub required: Vec<String>,
    #[serde(serialize_with = "serialize_properties")]
    pub properties: Vec<(String, Property)>,
}

impl ParameterBlock {
    /// Look up a property by variable name
    pub fn property(&self, variable: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|(name, _)| name == variable)
            .map(|(_, property)| property)
    }
}

/// A form field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<&'static str>,
    pub max_length: Option<Value>,
    pub min_length: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_names: Option<Vec<Value>>,
}

impl Property {
    fn from_question(question: &SurveyQuestion) -> Self {
        let property_type = backstage_type(&question.question_type);
        if property_type.is_none() {
            warn!(
                variable = %question.variable,
                question_type = %question.question_type,
                "unknown survey question type"
            );
        }

        let choices = question.choice_list();

        Self {
            title: question.question_name.clone(),
            description: question.question_description.clone(),
            property_type,
            max_length: question.max.clone(),
            min_length: question.min.clone(),
            default: question.default_value().cloned(),
            enum_names: choices.clone(),
            choices,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub id: String,
    pub name: String,
    pub action: String,
    pub input: StepInput,
}

/// Inputs handed to the sync action
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepInput {
    pub repo_owner: String,
    pub repo_name: String,
    pub description: String,
    pub collection_group: String,
    pub collection_name: String,
    pub application_type: String,
    pub source_control: String,
}

impl Default for StepInput {
    fn default() -> Self {
        Self {
            repo_owner: parameter_ref("repoOwner"),
            repo_name: parameter_ref("repoName"),
            description: parameter_ref("description"),
            collection_group: parameter_ref("collectionGroup"),
            collection_name: parameter_ref("collectionName"),
            application_type: APPLICATION_TYPE.to_string(),
            source_control: parameter_ref("sourceControl"),
        }
    }
}

fn parameter_ref(name: &str) -> String {
    format!("${{{{ parameters.{} }}}}", name)
}

fn serialize_properties<S: Serializer>(
    properties: &[(String, Property)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(properties.len()))?;
    for (name, property) in properties {
        map.serialize_entry(name, property)?;
    }
    map.end()
}

impl Template {
    /// Build the template for one survey of an experience.
    ///
    /// Returns `None` when the survey has no name to build a template from.
    pub fn from_survey(
        experience: &str,
        survey: &SurveySpec,
        config: &TemplatesConfig,
    ) -> Option<Self> {
        let name = survey.slug()?;
        let title = survey.name.clone()?;

        let mut required: Vec<String> = Vec::new();
        let mut properties: Vec<(String, Property)> = Vec::new();

        for question in &survey.spec {
            let property = Property::from_question(question);
            match properties.iter_mut().find(|(v, _)| *v == question.variable) {
                Some((_, existing)) => *existing = property,
                None => properties.push((question.variable.clone(), property)),
            }

            if question.is_required() && !required.contains(&question.variable) {
                required.push(question.variable.clone());
            }
        }

        Some(Self {
            api_version: TEMPLATE_API_VERSION.to_string(),
            kind: "Template".to_string(),
            metadata: TemplateMetadata {
                title,
                name,
                description: survey.description.clone(),
                tags: TEMPLATE_TAGS.iter().map(|t| t.to_string()).collect(),
            },
            spec: TemplateSpec {
                owner: config.owner.clone(),
                system: config.system.clone(),
                template_type: "service".to_string(),
                parameters: vec![ParameterBlock {
                    title: PARAMETERS_TITLE.to_string(),
                    required,
                    properties,
                }],
                steps: vec![Step {
                    id: STEP_ID.to_string(),
                    name: STEP_NAME.to_string(),
                    action: STEP_ACTION.to_string(),
                    input: StepInput::default(),
                }],
            },
            experience: experience.to_string(),
        })
    }

    /// Experience directory the survey came from
    pub fn experience(&self) -> &str {
        &self.experience
    }

    /// The single parameter page
    pub fn parameters(&self) -> &ParameterBlock {
        &self.spec.parameters[0]
    }
}

impl Document for Template {
    fn file_name(&self) -> String {
        template_file_name(&self.experience, &self.metadata.name)
    }
}

/// Output file name for a survey of an experience
pub fn template_file_name(experience: &str, survey_slug: &str) -> String {
    format!(
        "automation_experience_{}_{}_template.yaml",
        experience, survey_slug
    )
}
