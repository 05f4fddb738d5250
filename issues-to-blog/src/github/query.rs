//! GraphQL documents and their response shapes.

use super::models::{Comment, Issue, Viewer};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Maximum number of issues fetched per run.
pub const MAX_ISSUES: u32 = 30;

/// Maximum number of labels fetched per issue.
pub const MAX_LABELS: u32 = 30;

/// Maximum number of comments fetched per issue.
pub const MAX_COMMENTS: u32 = 100;

/// Avatar size requested for comment authors, in pixels.
pub const AVATAR_SIZE: u32 = 160;

/// Login shown for comments whose author account was deleted.
pub const GHOST_LOGIN: &str = "ghost";

pub(crate) const LABELED_ISSUES_QUERY: &str = r#"
query LabeledIssues($owner: String!, $name: String!, $labels: [String!], $issues: Int!, $labelCount: Int!, $commentCount: Int!, $avatarSize: Int!) {
  repository(owner: $owner, name: $name) {
    issues(first: $issues, labels: $labels, states: [OPEN], orderBy: {field: CREATED_AT, direction: ASC}) {
      nodes {
        number
        title
        url
        createdAt
        body
        labels(first: $labelCount) {
          nodes { name }
        }
        comments(first: $commentCount) {
          nodes {
            id
            publishedAt
            bodyHTML
            author {
              login
              avatarUrl(size: $avatarSize)
            }
          }
        }
      }
    }
  }
}
"#;

pub(crate) const VIEWER_QUERY: &str = r#"
query Viewer {
  viewer {
    login
    name
    email
  }
}
"#;

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub(crate) data: Option<T>,
    pub(crate) errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub(crate) message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabeledIssuesData {
    pub(crate) repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryNode {
    pub(crate) issues: Connection<IssueNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Connection<T> {
    pub(crate) nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IssueNode {
    number: u64,
    title: String,
    url: Option<String>,
    created_at: DateTime<Utc>,
    body: String,
    labels: Option<Connection<LabelNode>>,
    comments: Connection<CommentNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LabelNode {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentNode {
    id: String,
    published_at: Option<DateTime<Utc>>,
    #[serde(rename = "bodyHTML")]
    body_html: String,
    author: Option<AuthorNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthorNode {
    login: String,
    avatar_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViewerData {
    pub(crate) viewer: ViewerNode,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ViewerNode {
    login: String,
    name: Option<String>,
    email: Option<String>,
}

impl From<IssueNode> for Issue {
    fn from(node: IssueNode) -> Self {
        Self {
            number: node.number,
            title: node.title,
            url: node.url,
            created_at: node.created_at,
            body: node.body,
            labels: node
                .labels
                .map(|labels| labels.nodes.into_iter().map(|label| label.name).collect())
                .unwrap_or_default(),
            comments: node.comments.nodes.into_iter().map(Comment::from).collect(),
        }
    }
}

impl From<CommentNode> for Comment {
    fn from(node: CommentNode) -> Self {
        let (author_login, avatar_url) = match node.author {
            Some(author) => (author.login, author.avatar_url),
            None => (GHOST_LOGIN.to_string(), String::new()),
        };
        Self {
            id: node.id,
            published_at: node.published_at,
            author_login,
            avatar_url,
            body_html: node.body_html,
        }
    }
}

impl From<ViewerNode> for Viewer {
    fn from(node: ViewerNode) -> Self {
        Self {
            login: node.login,
            name: node.name,
            email: node.email,
        }
    }
}
