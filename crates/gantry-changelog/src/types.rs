//! Check outcome types

use crate::fragment::InvalidFragment;

/// Explanation shown when a required fragment is missing
pub const MISSING_FRAGMENT_HINT: &str = "Missing changelog fragment. This is not required only if \
     the change adds new modules and plugins or contains only documentation changes.";

/// Explanation shown when no fragment was needed
pub const NOT_REQUIRED_NOTE: &str = "Changelog not required as the change adds new modules and/or \
     plugins or contains only documentation changes.";

/// Final decision of a changelog check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Nothing to object to
    Pass,
    /// The change looks like an automated collection release
    ReleaseDetected,
    /// No fragment supplied and none needed
    NotRequired,
    /// A fragment is needed but none was supplied
    MissingFragment,
    /// One or more supplied fragments are malformed
    InvalidFragment(Vec<InvalidFragment>),
}

impl Verdict {
    /// Whether the check passed
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Pass | Self::ReleaseDetected | Self::NotRequired)
    }

    /// Process exit status for this verdict; 1 for a failing check
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    /// Machine-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::ReleaseDetected => "release_detected",
            Self::NotRequired => "not_required",
            Self::MissingFragment => "missing_fragment",
            Self::InvalidFragment(_) => "invalid_fragment",
        }
    }

    /// Paths of rejected fragments
    pub fn invalid_paths(&self) -> Vec<&str> {
        match self {
            Self::InvalidFragment(invalid) => invalid.iter().map(|f| f.path.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Everything a check decided, for reporting
#[derive(Debug, Clone)]
pub struct Classification {
    /// Final decision
    pub verdict: Verdict,
    /// Added fragment files
    pub supplied_fragments: Vec<String>,
    /// Modified or deleted paths that belong to a distributable unit
    pub unit_changes: Vec<String>,
    /// Changed documentation paths
    pub documentation_changes: Vec<String>,
}
