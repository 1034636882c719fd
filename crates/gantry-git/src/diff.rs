//! Change lists between the working tree and a reference

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{Delta, DiffFindOptions};
use tracing::{debug, info, instrument};

use gantry_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::{ChangeSet, ChangeStatus};

/// Something that can list the paths changed since a reference
pub trait DiffSource {
    /// Short name for logs and reports
    fn name(&self) -> &'static str;

    /// List changes between the working tree and `reference`.
    ///
    /// A failure here means no change list exists, so callers treat it as
    /// fatal.
    fn changes_since(&self, reference: &str) -> Result<ChangeSet>;
}

/// Runs `git diff <ref> --name-status` in a working directory.
///
/// The command runs to completion with no timeout.
#[derive(Debug, Clone)]
pub struct GitCliDiff {
    workdir: PathBuf,
    program: String,
}

impl GitCliDiff {
    /// Diff source running `git` in `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            program: "git".to_string(),
        }
    }

    /// Use a different git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Working directory the command runs in
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl DiffSource for GitCliDiff {
    fn name(&self) -> &'static str {
        "git-cli"
    }

    #[instrument(skip(self), fields(workdir = %self.workdir.display()))]
    fn changes_since(&self, reference: &str) -> Result<ChangeSet> {
        info!(command = %format!("{} diff {} --name-status", self.program, reference), "executing");

        let output = Command::new(&self.program)
            .current_dir(&self.workdir)
            .args(["diff", reference, "--name-status"])
            .output()
            .map_err(|e| GitError::SpawnFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::DiffFailed {
                reference: reference.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let changes = ChangeSet::from_name_status(&stdout);
        debug!(changed = changes.len(), "parsed name-status output");
        Ok(changes)
    }
}

impl GitRepo {
    /// Compute the same change list as `git diff <ref> --name-status` with
    /// libgit2: the tree of `reference` against the index and working tree,
    /// untracked files excluded, renames detected.
    #[instrument(skip(self))]
    pub fn changes_since(&self, reference: &str) -> Result<ChangeSet> {
        let tree = self
            .repo
            .revparse_single(reference)
            .and_then(|object| object.peel_to_tree())
            .map_err(|_| GitError::UnknownReference(reference.to_string()))?;

        let mut diff = self.repo.diff_tree_to_workdir_with_index(Some(&tree), None)?;
        let mut find = DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))?;

        let mut changes = ChangeSet::new();
        for delta in diff.deltas() {
            let status = match delta.status() {
                Delta::Added => ChangeStatus::Added,
                Delta::Deleted => ChangeStatus::Deleted,
                Delta::Modified => ChangeStatus::Modified,
                Delta::Renamed => ChangeStatus::Renamed,
                Delta::Copied => ChangeStatus::Copied,
                Delta::Typechange => ChangeStatus::TypeChanged,
                Delta::Conflicted => ChangeStatus::Unmerged,
                Delta::Unreadable => ChangeStatus::Unknown,
                Delta::Unmodified | Delta::Ignored | Delta::Untracked => continue,
            };

            let file = if status == ChangeStatus::Deleted {
                delta.old_file()
            } else {
                delta.new_file()
            };

            if let Some(path) = file.path() {
                changes.insert(status, path.to_string_lossy());
            }
        }

        debug!(changed = changes.len(), "computed libgit2 diff");
        Ok(changes)
    }
}

impl DiffSource for GitRepo {
    fn name(&self) -> &'static str {
        "libgit2"
    }

    fn changes_since(&self, reference: &str) -> Result<ChangeSet> {
        GitRepo::changes_since(self, reference)
    }
}
