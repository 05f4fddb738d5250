//! GitHub API error types.

use thiserror::Error;

/// Errors that can occur while talking to the GitHub API.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Transport, authentication or decoding error from octocrab.
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// The GraphQL endpoint answered with an `errors` array.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// The response carried neither data nor errors.
    #[error("GraphQL response for {query} contained no data")]
    MissingData { query: &'static str },

    /// The repository does not exist or the token cannot see it.
    #[error("Repository {owner}/{name} not found")]
    RepositoryNotFound { owner: String, name: String },
}
