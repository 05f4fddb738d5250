//! Fetching labeled issues from the GitHub GraphQL API.
//!
//! A single query returns the issues together with their labels and comments,
//! so a run never makes per-issue follow-up calls.

mod error;
mod models;
mod query;

pub use error::GitHubError;
pub use models::{Comment, Issue, Viewer};
pub use query::{AVATAR_SIZE, GHOST_LOGIN, MAX_COMMENTS, MAX_ISSUES, MAX_LABELS};

use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use query::{
    GraphQlResponse, LabeledIssuesData, ViewerData, LABELED_ISSUES_QUERY, VIEWER_QUERY,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::future::Future;
use tracing::{debug, info, info_span, warn, Instrument};

/// Source of blog issues and of the commit identity.
pub trait IssueSource {
    /// Returns open issues of `owner/name` carrying `label`, oldest first.
    fn labeled_issues(
        &self,
        owner: &str,
        name: &str,
        label: &str,
    ) -> impl Future<Output = Result<Vec<Issue>, GitHubError>>;

    /// Returns the user the token belongs to.
    fn viewer(&self) -> impl Future<Output = Result<Viewer, GitHubError>>;
}

/// [`IssueSource`] backed by octocrab's GraphQL client.
#[derive(Clone)]
pub struct GraphQlIssueSource {
    octocrab: Octocrab,
}

impl GraphQlIssueSource {
    /// Builds an authenticated client.
    ///
    /// `api_base_url` replaces `https://api.github.com` when set. Failed
    /// requests are not retried.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::Api`] if the base URL is invalid or the client
    /// cannot be built.
    pub fn new(token: &str, api_base_url: Option<&str>) -> Result<Self, GitHubError> {
        let mut builder = Octocrab::builder().add_retry_config(RetryConfig::None);
        if let Some(base_url) = api_base_url {
            builder = builder.base_uri(base_url)?;
        }
        let octocrab = builder.personal_token(token.to_string()).build()?;
        Ok(Self { octocrab })
    }

    /// Runs a GraphQL document and unwraps the `data` envelope.
    async fn graphql<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<T, GitHubError> {
        debug!(operation, "Executing GraphQL query");
        let body = json!({
            "query": document,
            "variables": variables,
        });
        let response: GraphQlResponse<T> = self.octocrab.graphql(&body).await?;

        if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
            let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
            return Err(GitHubError::GraphQl(messages.join(", ")));
        }

        response
            .data
            .ok_or(GitHubError::MissingData { query: operation })
    }
}

impl IssueSource for GraphQlIssueSource {
    async fn labeled_issues(
        &self,
        owner: &str,
        name: &str,
        label: &str,
    ) -> Result<Vec<Issue>, GitHubError> {
        let span = info_span!("fetch_issues", owner = %owner, repo = %name, label = %label);

        async {
            info!("Fetching labeled issues");

            let variables = json!({
                "owner": owner,
                "name": name,
                "labels": [label],
                "issues": MAX_ISSUES,
                "labelCount": MAX_LABELS,
                "commentCount": MAX_COMMENTS,
                "avatarSize": AVATAR_SIZE,
            });
            let data: LabeledIssuesData = self
                .graphql("LabeledIssues", LABELED_ISSUES_QUERY, variables)
                .await?;

            let repository = data
                .repository
                .ok_or_else(|| GitHubError::RepositoryNotFound {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })?;

            let issues: Vec<Issue> = repository
                .issues
                .nodes
                .into_iter()
                .map(Issue::from)
                .collect();

            if issues.len() >= MAX_ISSUES as usize {
                warn!(max = MAX_ISSUES, "Reached issue limit, later issues are not mirrored");
            }
            for issue in &issues {
                if issue.comments.len() >= MAX_COMMENTS as usize {
                    warn!(
                        issue = issue.number,
                        max = MAX_COMMENTS,
                        "Reached comment limit, later comments are not mirrored"
                    );
                }
            }

            info!(count = issues.len(), "Fetched issues");
            Ok(issues)
        }
        .instrument(span)
        .await
    }

    async fn viewer(&self) -> Result<Viewer, GitHubError> {
        let data: ViewerData = self.graphql("Viewer", VIEWER_QUERY, json!({})).await?;
        let viewer = Viewer::from(data.viewer);
        debug!(login = %viewer.login, "Resolved viewer");
        Ok(viewer)
    }
}
