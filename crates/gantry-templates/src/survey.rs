//! Job template survey specifications

use serde::Deserialize;
use serde_json::Value;

/// A survey specification exported from an automation controller job template
#[derive(Debug, Clone, Deserialize)]
pub struct SurveySpec {
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub spec: Vec<SurveyQuestion>,
}

impl SurveySpec {
    /// Survey name with spaces replaced by underscores, used in file and
    /// template names
    pub fn slug(&self) -> Option<String> {
        self.name.as_ref().map(|n| n.replace(' ', "_"))
    }
}

/// One survey question
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyQuestion {
    pub variable: String,
    pub question_name: String,
    #[serde(default)]
    pub question_description: Option<String>,
    #[serde(rename = "type")]
    pub question_type: String,
    #[serde(default)]
    pub min: Option<Value>,
    #[serde(default)]
    pub max: Option<Value>,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub required: Option<Value>,
    #[serde(default)]
    pub choices: Option<Value>,
}

impl SurveyQuestion {
    /// Whether the question must be answered
    pub fn is_required(&self) -> bool {
        self.required.as_ref().is_some_and(is_truthy)
    }

    /// The default answer, if one is set to something meaningful
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref().filter(|v| is_truthy(v))
    }

    /// Allowed answers.
    ///
    /// Controllers store choices either as a list or as one string with an
    /// answer per line; both come back as a list.
    pub fn choice_list(&self) -> Option<Vec<Value>> {
        let choices = self.choices.as_ref().filter(|v| is_truthy(v))?;
        match choices {
            Value::String(s) => Some(
                s.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(|line| Value::String(line.to_string()))
                    .collect(),
            ),
            Value::Array(items) => Some(items.clone()),
            other => Some(vec![other.clone()]),
        }
    }
}

/// Loose truthiness for JSON values exported by controllers
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(extra: Value) -> SurveyQuestion {
        let mut base = json!({
            "variable": "vm_name",
            "question_name": "VM name",
            "question_description": "Name of the VM",
            "type": "text",
        });
        if let (Value::Object(base), Value::Object(extra)) = (&mut base, extra) {
            base.extend(extra);
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn test_slug() {
        let survey: SurveySpec =
            serde_json::from_value(json!({"name": "Create RHEL VM", "spec": []})).unwrap();
        assert_eq!(survey.slug().as_deref(), Some("Create_RHEL_VM"));
    }

    #[test]
    fn test_missing_spec_is_empty() {
        let survey: SurveySpec = serde_json::from_value(json!({"name": "x"})).unwrap();
        assert!(survey.spec.is_empty());
        assert!(survey.description.is_none());
    }

    #[test]
    fn test_required_truthiness() {
        assert!(question(json!({"required": true})).is_required());
        assert!(!question(json!({"required": false})).is_required());
        assert!(!question(json!({})).is_required());
    }

    #[test]
    fn test_default_ignores_empty_values() {
        assert!(question(json!({"default": ""})).default_value().is_none());
        assert!(question(json!({"default": 0})).default_value().is_none());
        assert_eq!(
            question(json!({"default": "web01"})).default_value(),
            Some(&json!("web01"))
        );
    }

    #[test]
    fn test_choices_from_lines_or_list() {
        assert_eq!(
            question(json!({"choices": "small\nmedium\n\nlarge"})).choice_list(),
            Some(vec![json!("small"), json!("medium"), json!("large")])
        );
        assert_eq!(
            question(json!({"choices": ["a", "b"]})).choice_list(),
            Some(vec![json!("a"), json!("b")])
        );
        assert!(question(json!({"choices": ""})).choice_list().is_none());
        assert!(question(json!({"choices": []})).choice_list().is_none());
    }
}
