//! Version-control error types.

use thiserror::Error;

/// Errors that can occur while running git.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be started.
    #[error("Failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// git exited with a failure status.
    #[error("{command} failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    /// The origin URL does not name an `owner/repository` pair.
    #[error("Invalid origin remote URL '{url}': {reason}")]
    InvalidRemoteUrl { url: String, reason: String },

    /// HEAD does not point at a branch.
    #[error("HEAD is detached; configure a branch to push to")]
    DetachedHead,

    /// Staging the generated files left the index unchanged.
    #[error("Nothing to commit")]
    NothingToCommit,

    /// The remote refused the push.
    #[error("Push to branch '{branch}' was rejected: {stderr}")]
    PushRejected { branch: String, stderr: String },
}
