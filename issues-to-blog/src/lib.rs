#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod comments;
pub mod config;
pub mod git;
pub mod github;
pub mod output;
pub mod posts;
pub mod runner;
pub mod split;
pub mod summary;
pub mod templates;

#[cfg(test)]
mod testing;

pub use comments::{comment_path, render_comment, COMMENTS_DIR};
pub use config::{BlogConfig, BlogSettings, ConfigError};
pub use git::{
    authenticated_push_url, parse_remote_url, GitError, GitPublisher, LocalRepository,
    PublishRequest, Publisher, RemoteRepository,
};
pub use github::{Comment, GitHubError, GraphQlIssueSource, Issue, IssueSource, Viewer};
pub use output::{OutputError, RenderedFile};
pub use posts::{format_timestamp, post_path, render_post, POSTS_DIR};
pub use runner::{build_renderer, Runner, RunnerError};
pub use split::split_header_and_body;
pub use summary::RunSummary;
pub use templates::{create_handlebars_registry, TemplateError, TemplateRenderer};
