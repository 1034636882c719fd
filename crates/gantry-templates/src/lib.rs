//! Gantry Templates - Backstage software templates from automation surveys
//!
//! Walks experience directories, turns each exported job template survey
//! into a `scaffolder.backstage.io` Template and lists them all in one
//! `Location` manifest.

pub mod builder;
pub mod document;
pub mod experience;
pub mod manifest;
pub mod mapping;
pub mod survey;
pub mod template;

pub use builder::{BuildReport, ExperienceSurveys, SkippedFile, TemplateBuilder};
pub use document::Document;
pub use experience::{discover_experiences, Experience};
pub use manifest::LocationManifest;
pub use mapping::backstage_type;
pub use survey::{SurveyQuestion, SurveySpec};
pub use template::Template;
