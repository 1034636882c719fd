//! Survey question type to Backstage parameter type

/// Controller survey question types and the Backstage schema type each
/// becomes
pub const QUESTION_TYPES: &[(&str, &str)] = &[
    ("text", "string"),
    ("password", "secret"),
    ("integer", "number"),
    ("float", "number"),
    ("multiplechoice", "string"),
    ("multiselect", "string"),
];

/// Backstage type for a survey question type, if it is a known one
pub fn backstage_type(question_type: &str) -> Option<&'static str> {
    QUESTION_TYPES
        .iter()
        .find(|(from, _)| *from == question_type)
        .map(|(_, to)| *to)
}
