//! Gantry Core - Core library for collection CI checks
//!
//! This crate provides the foundational error taxonomy and configuration
//! shared by the changelog checker and the template builder.

pub mod config;
pub mod error;

pub use config::{ChangelogCheckConfig, Config, TemplatesConfig};
pub use error::{ChangelogError, ConfigError, GantryError, GitError, Result, TemplateError};
