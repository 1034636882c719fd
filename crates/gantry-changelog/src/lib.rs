//! Gantry Changelog - changelog fragment checks for collection changes
//!
//! This crate decides whether a change needs a changelog fragment and
//! whether the fragments it adds follow the collection's section schema.

pub mod classifier;
pub mod fragment;
pub mod rules;
pub mod schema;
pub mod types;

pub use classifier::{
    is_fragment_required, is_release, supplied_fragments, unit_changes, ChangeClassifier,
};
pub use fragment::{
    validate_fragment, validate_fragment_str, FragmentIssue, FragmentSource, FsFragments,
    InvalidFragment,
};
pub use rules::PathRules;
pub use schema::{load_schema, ChangelogSchema, LoadedSchema, SchemaSource};
pub use types::{Classification, Verdict, MISSING_FRAGMENT_HINT, NOT_REQUIRED_NOTE};
