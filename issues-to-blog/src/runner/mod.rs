//! Orchestrates a mirror run: fetch, render, write and optionally push.

mod error;

pub use error::RunnerError;

use crate::comments::render_comment;
use crate::config::{BlogConfig, BlogSettings};
use crate::git::{GitPublisher, LocalRepository, PublishRequest, Publisher};
use crate::github::{GraphQlIssueSource, IssueSource};
use crate::output::RenderedFile;
use crate::posts::render_post;
use crate::summary::RunSummary;
use crate::templates::{TemplateRenderer, DEFAULT_COMMENT_TEMPLATE, DEFAULT_POST_TEMPLATE};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Mirrors labeled issues of a repository into its own working tree.
pub struct Runner<S = GraphQlIssueSource, P = GitPublisher> {
    config: BlogConfig,
    settings: BlogSettings,
    repository: LocalRepository,
    source: S,
    publisher: P,
    renderer: TemplateRenderer,
}

impl Runner {
    /// Builds a runner for the working tree enclosing the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the repository cannot be discovered, the
    /// settings or templates are invalid, or the API client cannot be built.
    pub async fn new(config: BlogConfig) -> Result<Self, RunnerError> {
        Self::for_directory(config, Path::new(".")).await
    }

    /// Builds a runner for the working tree enclosing `start`.
    ///
    /// # Errors
    ///
    /// See [`Runner::new`].
    pub async fn for_directory(config: BlogConfig, start: &Path) -> Result<Self, RunnerError> {
        let repository = LocalRepository::discover(start).await?;
        let settings = BlogSettings::load(&repository.root, config.settings_path())?;
        let renderer = build_renderer(&repository.root, &settings)?;
        let source = GraphQlIssueSource::new(config.token(), settings.api_base_url.as_deref())?;
        let publisher = GitPublisher::new(repository.clone());

        Ok(Self::with_parts(
            config, settings, repository, source, publisher, renderer,
        ))
    }
}

impl<S: IssueSource, P: Publisher> Runner<S, P> {
    /// Assembles a runner from already built parts.
    pub fn with_parts(
        config: BlogConfig,
        settings: BlogSettings,
        repository: LocalRepository,
        source: S,
        publisher: P,
        renderer: TemplateRenderer,
    ) -> Self {
        Self {
            config,
            settings,
            repository,
            source,
            publisher,
            renderer,
        }
    }

    /// Returns the repository being mirrored.
    pub fn repository(&self) -> &LocalRepository {
        &self.repository
    }

    /// Returns the effective blog settings.
    pub fn settings(&self) -> &BlogSettings {
        &self.settings
    }

    /// Executes the full mirror flow.
    ///
    /// Every fetched issue is rewritten unconditionally. With `push`, the
    /// written files are committed and pushed; nothing is pushed on a dry run.
    ///
    /// # Errors
    ///
    /// Stops at the first failure and returns it.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run());
        let remote = &self.repository.remote;

        let mut issues = self
            .source
            .labeled_issues(&remote.owner, &remote.name, &self.settings.label)
            .await?;
        issues.sort_by_key(|issue| issue.number);
        summary.issues_fetched = issues.len();

        if issues.is_empty() {
            warn!(label = %self.settings.label, "No labeled issues found");
        } else {
            info!(count = issues.len(), "Found issues");
        }

        let mut written = Vec::new();
        for issue in &issues {
            let post = render_post(issue, &self.renderer, self.settings.new_comment_anchor)?;
            self.emit(post, &mut written)?;

            for comment in &issue.comments {
                let record = render_comment(issue.number, comment, &self.renderer)?;
                self.emit(record, &mut written)?;
            }

            debug!(issue = issue.number, comments = issue.comments.len(), "Rendered issue");
            summary.record_issue(issue.comments.len());
        }

        if !self.config.push() {
            return Ok(summary);
        }

        if self.config.dry_run() {
            info!(files = written.len(), "[DRY RUN] Would commit and push");
            return Ok(summary);
        }

        let (author_name, author_email) = self.commit_identity().await?;
        let request = PublishRequest {
            paths: &written,
            message: &self.settings.commit_message,
            author_name: &author_name,
            author_email: &author_email,
            token: self.config.token(),
            branch: self.settings.branch.as_deref(),
        };
        let branch = self.publisher.publish(&request).await?;
        summary.pushed_branch = Some(branch);

        Ok(summary)
    }

    /// Writes a generated file, or only logs it on a dry run.
    fn emit(&self, file: RenderedFile, written: &mut Vec<PathBuf>) -> Result<(), RunnerError> {
        if self.config.dry_run() {
            info!(
                path = %file.path.display(),
                bytes = file.contents.len(),
                "[DRY RUN] Would write file"
            );
        } else {
            file.write(&self.repository.root)?;
        }

        written.push(file.path);
        Ok(())
    }

    /// Resolves the commit author, asking GitHub only for missing parts.
    async fn commit_identity(&self) -> Result<(String, String), RunnerError> {
        if let (Some(name), Some(email)) = (self.config.viewer_name(), self.config.viewer_email())
        {
            return Ok((name.to_string(), email.to_string()));
        }

        let viewer = self.source.viewer().await?;
        let name = self
            .config
            .viewer_name()
            .map_or_else(|| viewer.commit_name().to_string(), str::to_string);
        let email = self
            .config
            .viewer_email()
            .map_or_else(|| viewer.commit_email(), str::to_string);

        Ok((name, email))
    }
}

/// Builds the renderer, replacing built-in layouts with configured ones.
///
/// # Errors
///
/// Returns [`RunnerError`] if a template file cannot be read or compiled.
pub fn build_renderer(root: &Path, settings: &BlogSettings) -> Result<TemplateRenderer, RunnerError> {
    let post = BlogSettings::read_template(root, settings.post_template.as_deref())?;
    let comment = BlogSettings::read_template(root, settings.comment_template.as_deref())?;

    let renderer = TemplateRenderer::with_templates(
        post.as_deref().unwrap_or(DEFAULT_POST_TEMPLATE),
        comment.as_deref().unwrap_or(DEFAULT_COMMENT_TEMPLATE),
    )?;
    Ok(renderer)
}
