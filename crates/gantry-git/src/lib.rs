//! Gantry Git - change lists for collection checks
//!
//! This crate turns the difference between a working tree and a base
//! reference into a [`ChangeSet`], either by running `git diff --name-status`
//! or by asking libgit2 directly.

mod diff;
mod repository;
pub mod types;

pub use diff::{DiffSource, GitCliDiff};
pub use repository::{GitRepo, Result};
pub use types::{ChangeSet, ChangeStatus};
