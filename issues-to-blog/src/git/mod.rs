//! Local repository discovery and publishing through git.
//!
//! Everything here shells out to the `git` executable, so the user's own
//! configuration (hooks, signing, proxies) applies.

mod command;
mod error;
mod remote;

pub use error::GitError;
pub use remote::{authenticated_push_url, parse_remote_url, RemoteRepository};

use command::{git_output, run_git, run_git_with_env};
use remote::encoded_password;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, Instrument};

/// Name of the remote the blog is read from and pushed to.
pub const ORIGIN: &str = "origin";

/// The working tree the blog is generated into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    /// Root of the working tree.
    pub root: PathBuf,

    /// Raw URL of the origin remote.
    pub origin_url: String,

    /// Owner and name parsed from the origin URL.
    pub remote: RemoteRepository,
}

impl LocalRepository {
    /// Finds the working tree enclosing `start` and reads its origin remote.
    ///
    /// # Errors
    ///
    /// Returns [`GitError`] if `start` is not inside a working tree, there is
    /// no origin remote, or its URL does not name `owner/repository`.
    pub async fn discover(start: &Path) -> Result<Self, GitError> {
        let root = PathBuf::from(run_git(start, &["rev-parse", "--show-toplevel"]).await?);
        let origin_url = run_git(&root, &["remote", "get-url", ORIGIN]).await?;
        let remote = parse_remote_url(&origin_url)?;

        debug!(
            root = %root.display(),
            owner = %remote.owner,
            repo = %remote.name,
            "Discovered local repository"
        );

        Ok(Self {
            root,
            origin_url,
            remote,
        })
    }

    /// Returns the branch HEAD points at.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::DetachedHead`] if HEAD is detached, or the
    /// underlying error if git could not be run.
    pub async fn current_branch(&self) -> Result<String, GitError> {
        run_git(&self.root, &["symbolic-ref", "--quiet", "--short", "HEAD"])
            .await
            .map_err(|e| match e {
                GitError::CommandFailed { .. } => GitError::DetachedHead,
                other => other,
            })
    }
}

/// What to publish and as whom.
#[derive(Debug, Clone, Copy)]
pub struct PublishRequest<'a> {
    /// Files to stage, relative to the working tree root.
    pub paths: &'a [PathBuf],

    /// Commit message.
    pub message: &'a str,

    /// Author and committer name.
    pub author_name: &'a str,

    /// Author and committer email.
    pub author_email: &'a str,

    /// Token used as push credentials.
    pub token: &'a str,

    /// Branch to push to; the checked-out branch when `None`.
    pub branch: Option<&'a str>,
}

/// Commits generated files and pushes them.
pub trait Publisher {
    /// Stages `request.paths`, commits them and pushes the commit.
    ///
    /// Returns the branch that was pushed.
    fn publish(&self, request: &PublishRequest<'_>)
        -> impl Future<Output = Result<String, GitError>>;
}

/// [`Publisher`] running git in a [`LocalRepository`].
#[derive(Debug, Clone)]
pub struct GitPublisher {
    repository: LocalRepository,
}

impl GitPublisher {
    /// Creates a publisher for `repository`.
    pub fn new(repository: LocalRepository) -> Self {
        Self { repository }
    }

    /// Stages the given paths.
    async fn stage(&self, paths: &[PathBuf]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Ok(());
        }
        let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        run_git(&self.repository.root, &args).await?;
        Ok(())
    }

    /// Returns whether the index differs from HEAD.
    async fn has_staged_changes(&self) -> Result<bool, GitError> {
        let output = git_output(
            &self.repository.root,
            &["diff", "--cached", "--quiet"],
            &[],
        )
        .await?;

        match output.status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(GitError::CommandFailed {
                command: "git diff".to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }

    /// Creates a commit with the given identity as author and committer.
    async fn commit(&self, message: &str, name: &str, email: &str) -> Result<(), GitError> {
        let identity = [
            ("GIT_AUTHOR_NAME", name),
            ("GIT_AUTHOR_EMAIL", email),
            ("GIT_COMMITTER_NAME", name),
            ("GIT_COMMITTER_EMAIL", email),
        ];
        run_git_with_env(
            &self.repository.root,
            &["commit", "--quiet", "-m", message],
            &identity,
        )
        .await?;
        Ok(())
    }

    /// Pushes HEAD to `branch` on the origin host.
    async fn push(&self, branch: &str, token: &str) -> Result<(), GitError> {
        let url = authenticated_push_url(&self.repository.origin_url, token);
        let refspec = format!("HEAD:refs/heads/{branch}");
        let output = git_output(&self.repository.root, &["push", &url, &refspec], &[]).await?;

        if !output.status.success() {
            let stderr = redact_token(&String::from_utf8_lossy(&output.stderr), token);
            return Err(GitError::PushRejected {
                branch: branch.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

impl Publisher for GitPublisher {
    async fn publish(&self, request: &PublishRequest<'_>) -> Result<String, GitError> {
        let branch = match request.branch {
            Some(branch) => branch.to_string(),
            None => self.repository.current_branch().await?,
        };
        let span = info_span!(
            "publish",
            repo = %self.repository.root.display(),
            branch = %branch
        );

        async {
            info!(files = request.paths.len(), "Staging generated files");
            self.stage(request.paths).await?;

            if !self.has_staged_changes().await? {
                return Err(GitError::NothingToCommit);
            }

            info!(author = %request.author_name, "Committing");
            self.commit(request.message, request.author_name, request.author_email)
                .await?;

            info!("Pushing");
            self.push(&branch, request.token).await?;

            info!("Published");
            Ok(branch.clone())
        }
        .instrument(span)
        .await
    }
}

/// Removes `token` from git output, both raw and as it appears in a URL.
fn redact_token(text: &str, token: &str) -> String {
    if token.is_empty() {
        return text.to_string();
    }

    let mut redacted = text.replace(token, "***");
    let encoded = encoded_password(token);
    if encoded != token {
        redacted = redacted.replace(&encoded, "***");
    }
    redacted
}
