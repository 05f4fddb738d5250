//! Runner error types.

use crate::config::ConfigError;
use crate::git::GitError;
use crate::github::GitHubError;
use crate::output::OutputError;
use crate::templates::TemplateError;

/// Errors that can occur while mirroring issues.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Credentials, settings file or custom template problems.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// GitHub API failures.
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    /// A layout failed to render.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Generated files could not be written.
    #[error(transparent)]
    Output(#[from] OutputError),

    /// Discovery, commit or push failures.
    #[error(transparent)]
    Git(#[from] GitError),
}

impl RunnerError {
    /// Process exit code for this error.
    ///
    /// | code | cause |
    /// | --- | --- |
    /// | 2 | configuration, credentials or layout templates |
    /// | 3 | GitHub API |
    /// | 4 | filesystem |
    /// | 5 | version control |
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Template(_) => 2,
            Self::GitHub(_) => 3,
            Self::Output(_) => 4,
            Self::Git(_) => 5,
        }
    }
}
