//! Issue and comment records fetched from GitHub.

use chrono::{DateTime, Utc};

/// An open issue carrying the blog label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue number, unique within the repository.
    pub number: u64,

    /// Issue title.
    pub title: String,

    /// Web URL of the issue, used for the comment form anchor.
    pub url: Option<String>,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Raw markdown body.
    pub body: String,

    /// Label names in API order.
    pub labels: Vec<String>,

    /// Comments in API order.
    pub comments: Vec<Comment>,
}

/// A comment on an [`Issue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// GraphQL node id.
    pub id: String,

    /// Publication time, absent for unpublished comments.
    pub published_at: Option<DateTime<Utc>>,

    /// Login of the author.
    pub author_login: String,

    /// Avatar URL of the author.
    pub avatar_url: String,

    /// Body rendered to HTML by GitHub.
    pub body_html: String,
}

/// The user the token belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    /// Account login.
    pub login: String,

    /// Profile display name.
    pub name: Option<String>,

    /// Public profile email.
    pub email: Option<String>,
}

impl Viewer {
    /// Name used for commits: the display name, or the login.
    #[must_use]
    pub fn commit_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.login)
    }

    /// Email used for commits: the public email, or the no-reply address.
    #[must_use]
    pub fn commit_email(&self) -> String {
        match self.email.as_deref().filter(|email| !email.is_empty()) {
            Some(email) => email.to_string(),
            None => format!("{}@users.noreply.github.com", self.login),
        }
    }
}
