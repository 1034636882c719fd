//! Changelog requirement classification
//!
//! Decides, from the paths a change touches, whether it is a release, whether
//! it needs a changelog fragment, and whether the fragments it adds are well
//! formed. Nothing here reads git or logs; fragment contents come from a
//! [`FragmentSource`].

use gantry_git::{ChangeSet, ChangeStatus};
use tracing::debug;

use crate::fragment::{validate_fragment, FragmentSource, InvalidFragment};
use crate::rules::PathRules;
use crate::schema::ChangelogSchema;
use crate::types::{Classification, Verdict};

/// Whether the change set has the shape of an automated release commit:
/// only modifications and deletions, every deletion a fragment, every
/// modification one of the release files.
pub fn is_release(changes: &ChangeSet, rules: &PathRules) -> bool {
    let only_modified_or_deleted = changes
        .statuses()
        .all(|s| matches!(s, ChangeStatus::Modified | ChangeStatus::Deleted));
    if !only_modified_or_deleted {
        return false;
    }

    changes.deleted().iter().all(|p| rules.is_fragment(p))
        && changes.modified().iter().all(|p| rules.is_release_file(p))
}

/// Modified or deleted paths belonging to a distributable unit.
///
/// Added paths never count: a new module has no previous behavior to
/// describe a change against.
pub fn unit_changes<'a>(changes: &'a ChangeSet, rules: &PathRules) -> Vec<&'a str> {
    changes
        .modified()
        .iter()
        .chain(changes.deleted())
        .map(String::as_str)
        .filter(|p| rules.is_distributable_unit(p))
        .collect()
}

/// Whether the change needs a changelog fragment
pub fn is_fragment_required(changes: &ChangeSet, rules: &PathRules) -> bool {
    !unit_changes(changes, rules).is_empty()
}

/// Added fragment files, in diff order
pub fn supplied_fragments<'a>(changes: &'a ChangeSet, rules: &PathRules) -> Vec<&'a str> {
    changes
        .added()
        .iter()
        .map(String::as_str)
        .filter(|p| rules.is_fragment(p))
        .collect()
}

/// Runs the full changelog decision for one change set
pub struct ChangeClassifier<'a> {
    rules: &'a PathRules,
    schema: &'a ChangelogSchema,
}

impl<'a> ChangeClassifier<'a> {
    pub fn new(rules: &'a PathRules, schema: &'a ChangelogSchema) -> Self {
        Self { rules, schema }
    }

    /// Classify a change set.
    ///
    /// Order matters: a release short-circuits everything; otherwise every
    /// supplied fragment is validated even when none was required.
    pub fn classify(&self, changes: &ChangeSet, fragments: &dyn FragmentSource) -> Classification {
        let mut classification = Classification {
            verdict: Verdict::Pass,
            supplied_fragments: Vec::new(),
            unit_changes: Vec::new(),
            documentation_changes: changes
                .iter()
                .map(|(_, p)| p)
                .filter(|p| self.rules.is_documentation(p))
                .map(str::to_string)
                .collect(),
        };

        if changes.is_empty() {
            debug!("no changes");
            return classification;
        }

        if is_release(changes, self.rules) {
            classification.verdict = Verdict::ReleaseDetected;
            return classification;
        }

        classification.unit_changes = unit_changes(changes, self.rules)
            .into_iter()
            .map(str::to_string)
            .collect();
        classification.supplied_fragments = supplied_fragments(changes, self.rules)
            .into_iter()
            .map(str::to_string)
            .collect();
        debug!(
            supplied = ?classification.supplied_fragments,
            units = ?classification.unit_changes,
            "classified changes"
        );

        if classification.supplied_fragments.is_empty() {
            classification.verdict = if classification.unit_changes.is_empty() {
                Verdict::NotRequired
            } else {
                Verdict::MissingFragment
            };
            return classification;
        }

        let invalid: Vec<InvalidFragment> = classification
            .supplied_fragments
            .iter()
            .filter_map(|path| validate_fragment(path, fragments, self.schema).err())
            .collect();

        if !invalid.is_empty() {
            classification.verdict = Verdict::InvalidFragment(invalid);
        }

        classification
    }
}
