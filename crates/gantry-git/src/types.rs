//! Git types

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Change status of a path, as reported by `git diff --name-status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ChangeStatus {
    /// Path was added
    #[serde(rename = "A")]
    Added,
    /// Path was copied from another path
    #[serde(rename = "C")]
    Copied,
    /// Path was deleted
    #[serde(rename = "D")]
    Deleted,
    /// Path contents changed
    #[serde(rename = "M")]
    Modified,
    /// Path was renamed from another path
    #[serde(rename = "R")]
    Renamed,
    /// File type changed (e.g. regular file to symlink)
    #[serde(rename = "T")]
    TypeChanged,
    /// Path is unmerged
    #[serde(rename = "U")]
    Unmerged,
    /// Pairing was broken
    #[serde(rename = "B")]
    Broken,
    /// Any other status letter
    #[serde(rename = "X")]
    Unknown,
}

impl ChangeStatus {
    /// Parse a status field such as `M`, `A` or `R100`.
    ///
    /// Only the leading letter is significant; the similarity score git
    /// appends to renames and copies is ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        let status = match code.chars().next()? {
            'A' => Self::Added,
            'C' => Self::Copied,
            'D' => Self::Deleted,
            'M' => Self::Modified,
            'R' => Self::Renamed,
            'T' => Self::TypeChanged,
            'U' => Self::Unmerged,
            'B' => Self::Broken,
            _ => Self::Unknown,
        };
        Some(status)
    }

    /// Single-letter code for this status
    pub fn code(&self) -> char {
        match self {
            Self::Added => 'A',
            Self::Copied => 'C',
            Self::Deleted => 'D',
            Self::Modified => 'M',
            Self::Renamed => 'R',
            Self::TypeChanged => 'T',
            Self::Unmerged => 'U',
            Self::Broken => 'B',
            Self::Unknown => 'X',
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Changed paths grouped by change status.
///
/// Paths are stored exactly as the diff source reported them, in that order.
/// A path is recorded under one status only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeSet {
    changes: BTreeMap<ChangeStatus, Vec<String>>,
}

impl ChangeSet {
    /// Create an empty change set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful in tests
    pub fn with(mut self, status: ChangeStatus, path: impl Into<String>) -> Self {
        self.insert(status, path);
        self
    }

    /// Record a changed path.
    ///
    /// Returns `false` (and records nothing) if the path is already present
    /// under any status.
    pub fn insert(&mut self, status: ChangeStatus, path: impl Into<String>) -> bool {
        let path = path.into();
        if path.is_empty() || self.contains(&path) {
            return false;
        }
        self.changes.entry(status).or_default().push(path);
        true
    }

    /// Parse the output of `git diff --name-status`.
    ///
    /// Each line is `<status>\t<path>`, or `<status>\t<old>\t<new>` for
    /// renames and copies, in which case the destination path is recorded.
    /// Lines of any other shape are ignored.
    pub fn from_name_status(output: &str) -> Self {
        let mut changes = Self::new();

        for line in output.lines() {
            let fields: Vec<&str> = line.split('\t').collect();
            let (code, path) = match fields.as_slice() {
                [code, path] => (*code, *path),
                [code, _from, to] if code.starts_with('R') || code.starts_with('C') => {
                    (*code, *to)
                }
                _ => continue,
            };

            if let Some(status) = ChangeStatus::from_code(code.trim()) {
                changes.insert(status, path);
            }
        }

        changes
    }

    /// Paths recorded under a status
    pub fn paths(&self, status: ChangeStatus) -> &[String] {
        self.changes.get(&status).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Added paths
    pub fn added(&self) -> &[String] {
        self.paths(ChangeStatus::Added)
    }

    /// Modified paths
    pub fn modified(&self) -> &[String] {
        self.paths(ChangeStatus::Modified)
    }

    /// Deleted paths
    pub fn deleted(&self) -> &[String] {
        self.paths(ChangeStatus::Deleted)
    }

    /// Statuses that have at least one path
    pub fn statuses(&self) -> impl Iterator<Item = ChangeStatus> + '_ {
        self.changes
            .iter()
            .filter(|(_, paths)| !paths.is_empty())
            .map(|(status, _)| *status)
    }

    /// Iterate over every `(status, path)` pair
    pub fn iter(&self) -> impl Iterator<Item = (ChangeStatus, &str)> + '_ {
        self.changes
            .iter()
            .flat_map(|(status, paths)| paths.iter().map(move |p| (*status, p.as_str())))
    }

    /// Whether a path is recorded under any status
    pub fn contains(&self, path: &str) -> bool {
        self.changes.values().any(|paths| paths.iter().any(|p| p == path))
    }

    /// Total number of changed paths
    pub fn len(&self) -> usize {
        self.changes.values().map(Vec::len).sum()
    }

    /// Whether nothing changed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_code() {
        assert_eq!(ChangeStatus::from_code("M"), Some(ChangeStatus::Modified));
        assert_eq!(ChangeStatus::from_code("R087"), Some(ChangeStatus::Renamed));
        assert_eq!(ChangeStatus::from_code("Z"), Some(ChangeStatus::Unknown));
        assert_eq!(ChangeStatus::from_code(""), None);
    }

    #[test]
    fn test_parse_name_status() {
        let output = "M\tplugins/modules/foo.py\n\
                      A\tchangelogs/fragments/foo.yml\n\
                      D\tdocs/old.md\n\
                      \n";
        let changes = ChangeSet::from_name_status(output);

        assert_eq!(changes.len(), 3);
        assert_eq!(changes.modified(), ["plugins/modules/foo.py"]);
        assert_eq!(changes.added(), ["changelogs/fragments/foo.yml"]);
        assert_eq!(changes.deleted(), ["docs/old.md"]);
    }

    #[test]
    fn test_parse_rename_records_destination() {
        let changes = ChangeSet::from_name_status("R100\troles/old/main.yml\troles/new/main.yml\n");
        assert_eq!(
            changes.paths(ChangeStatus::Renamed),
            ["roles/new/main.yml"]
        );
        assert!(!changes.contains("roles/old/main.yml"));
    }

    #[test]
    fn test_parse_ignores_malformed_lines() {
        let output = "warning: something odd\nM\ta\tb\tc\nM\tREADME.md\n";
        let changes = ChangeSet::from_name_status(output);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.modified(), ["README.md"]);
    }

    #[test]
    fn test_path_recorded_once() {
        let mut changes = ChangeSet::new();
        assert!(changes.insert(ChangeStatus::Modified, "galaxy.yml"));
        assert!(!changes.insert(ChangeStatus::Added, "galaxy.yml"));
        assert_eq!(changes.len(), 1);
        assert!(changes.added().is_empty());
    }

    #[test]
    fn test_paths_kept_verbatim() {
        let output = "M\tdocs/ notes.md\nA\tplugins\\modules\\foo.py\nD\ttrailing.yml \n";
        let changes = ChangeSet::from_name_status(output);

        assert_eq!(changes.modified(), ["docs/ notes.md"]);
        assert_eq!(changes.added(), ["plugins\\modules\\foo.py"]);
        assert_eq!(changes.deleted(), ["trailing.yml "]);
        assert!(!changes.contains("plugins/modules/foo.py"));
    }

    #[test]
    fn test_empty_path_is_not_recorded() {
        let mut changes = ChangeSet::new();
        assert!(!changes.insert(ChangeStatus::Modified, ""));
        assert!(changes.is_empty());
    }

    #[test]
    fn test_statuses_and_order() {
        let changes = ChangeSet::new()
            .with(ChangeStatus::Modified, "b.py")
            .with(ChangeStatus::Deleted, "x.yml")
            .with(ChangeStatus::Modified, "a.py");

        let statuses: Vec<_> = changes.statuses().collect();
        assert_eq!(statuses, vec![ChangeStatus::Deleted, ChangeStatus::Modified]);
        assert_eq!(changes.modified(), ["b.py", "a.py"]);
    }

    #[test]
    fn test_serialize_uses_status_codes() {
        let changes = ChangeSet::new().with(ChangeStatus::Added, "roles/x/tasks/main.yml");
        let json = serde_json::to_value(&changes).unwrap();
        assert_eq!(json["A"][0], "roles/x/tasks/main.yml");
    }
}
