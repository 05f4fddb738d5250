//! Temporary git repositories for tests.

use crate::git::{LocalRepository, RemoteRepository};
use std::path::{Path, PathBuf};
use std::process::Command;

/// A temporary working tree on branch `main`, optionally with a bare origin.
pub(crate) struct TestRepo {
    dir: tempfile::TempDir,
    remote: Option<tempfile::TempDir>,
}

impl TestRepo {
    /// Create a git Command with isolated config (ignores global/system settings).
    fn git_command(dir: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(dir);
        cmd.env("GIT_CONFIG_GLOBAL", "/dev/null");
        cmd.env("GIT_CONFIG_SYSTEM", "/dev/null");
        cmd
    }

    fn run(dir: &Path, args: &[&str]) -> String {
        let output = Self::git_command(dir)
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Create a new repository with an initial commit.
    pub(crate) fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        Self::run(dir.path(), &["init", "--quiet"]);
        Self::run(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);
        Self::run(dir.path(), &["config", "user.email", "test@example.com"]);
        Self::run(dir.path(), &["config", "user.name", "Test User"]);
        Self::run(dir.path(), &["config", "commit.gpgsign", "false"]);
        Self::run(
            dir.path(),
            &["commit", "--quiet", "--allow-empty", "-m", "Initial commit"],
        );

        Self { dir, remote: None }
    }

    /// Create a repository whose origin is a local bare repository.
    pub(crate) fn with_bare_remote() -> Self {
        let mut repo = Self::new();
        let remote = tempfile::tempdir().expect("Failed to create temp dir");
        Self::run(remote.path(), &["init", "--quiet", "--bare"]);

        let remote_path = remote.path().display().to_string();
        repo.git(&["remote", "add", "origin", &remote_path]);
        repo.git(&["push", "--quiet", "origin", "main"]);
        repo.remote = Some(remote);
        repo
    }

    /// Get the canonicalized path to the repository.
    /// This resolves symlinks (e.g., /var -> /private/var on macOS).
    pub(crate) fn path(&self) -> PathBuf {
        self.dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize path")
    }

    /// Run git in the working tree and return its output.
    pub(crate) fn git(&self, args: &[&str]) -> String {
        Self::run(&self.path(), args)
    }

    /// Write a file relative to the working tree root.
    pub(crate) fn write(&self, relative: &str, contents: &str) {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directory");
        }
        std::fs::write(path, contents).expect("Failed to write file");
    }

    /// The repository as the publisher sees it.
    pub(crate) fn local_repository(&self) -> LocalRepository {
        let origin_url = self.git(&["remote", "get-url", "origin"]);
        LocalRepository {
            root: self.path(),
            origin_url,
            remote: RemoteRepository {
                host: None,
                owner: "owner".to_string(),
                name: "blog".to_string(),
            },
        }
    }

    /// Format the tip commit of `branch` in the bare origin.
    pub(crate) fn remote_log(&self, branch: &str, format: &str) -> String {
        let remote = self.remote.as_ref().expect("Repository has no remote");
        Self::run(
            remote.path(),
            &["log", "-1", &format!("--format={format}"), branch],
        )
    }
}
