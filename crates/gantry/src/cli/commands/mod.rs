//! CLI commands

mod changelog;
mod init;
mod templates;

pub use changelog::ChangelogCommand;
pub use init::InitCommand;
pub use templates::TemplatesCommand;
