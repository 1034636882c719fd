//! Git repository access

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{info, instrument};

use gantry_core::error::GitError;

use crate::diff::GitCliDiff;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// A collection checkout
pub struct GitRepo {
    pub(crate) repo: Repository,
    root: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted exactly at `path`
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!("opening git repository");
        let repo = Repository::open(path).map_err(|e| map_open_error(e, path))?;
        Self::from_repository(repo)
    }

    /// Find the repository containing `start_path`, searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        info!("discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| map_open_error(e, start_path))?;
        Self::from_repository(repo)
    }

    fn from_repository(repo: Repository) -> Result<Self> {
        // Changed paths are relative to the working tree; a bare repo has none.
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| GitError::OpenFailed("repository has no working tree".to_string()))?;
        Ok(Self { repo, root })
    }

    /// Top-level directory of the working tree
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A `git diff` command runner rooted at this working tree
    pub fn cli_diff(&self) -> GitCliDiff {
        GitCliDiff::new(self.root.clone())
    }

    /// Get a reference to the inner git2 Repository
    pub fn inner(&self) -> &Repository {
        &self.repo
    }
}

fn map_open_error(e: git2::Error, path: &Path) -> GitError {
    if e.code() == git2::ErrorCode::NotFound {
        GitError::NotARepository(path.to_path_buf())
    } else {
        GitError::OpenFailed(e.to_string())
    }
}
