//! Rendering issues into Jekyll posts.

use crate::github::Issue;
use crate::output::RenderedFile;
use crate::split::split_header_and_body;
use crate::templates::{TemplateError, TemplateRenderer};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Directory of generated posts, relative to the working tree root.
pub const POSTS_DIR: &str = "_posts";

/// Fragment appended to the issue URL to land on the comment form.
pub const NEW_COMMENT_ANCHOR: &str = "#new_comment_field";

/// Sortable UTC timestamp format used in front matter and comment records.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SSZ`.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Returns the post path for an issue.
///
/// Format: `_posts/{year}/{year}-{month}-{day}-issue-{number}.markdown`, with
/// month and day not zero-padded.
#[must_use]
pub fn post_path(issue: &Issue) -> PathBuf {
    let date = issue.created_at;
    let year = date.year();
    PathBuf::from(POSTS_DIR)
        .join(year.to_string())
        .join(format!(
            "{year}-{}-{}-issue-{}.markdown",
            date.month(),
            date.day(),
            issue.number
        ))
}

/// Variables available to the post layout.
#[derive(Debug, Serialize)]
struct PostView<'a> {
    title: String,
    date: String,
    tags: String,
    new_comment_url: String,
    header: &'a str,
    body: &'a str,
}

/// Renders an issue into a post file.
///
/// The fenced fragment of the issue body becomes part of the front matter and
/// the rest becomes the post body. When `comment_anchor` is set and the issue
/// URL is known, the front matter links to the issue's comment form.
///
/// # Errors
///
/// Returns [`TemplateError`] if the layout cannot be rendered.
pub fn render_post(
    issue: &Issue,
    renderer: &TemplateRenderer,
    comment_anchor: bool,
) -> Result<RenderedFile, TemplateError> {
    let (header, body) = split_header_and_body(&issue.body);

    let new_comment_url = match (&issue.url, comment_anchor) {
        (Some(url), true) => format!("{url}{NEW_COMMENT_ANCHOR}"),
        _ => String::new(),
    };

    let view = PostView {
        title: escape_title(&issue.title),
        date: format_timestamp(&issue.created_at),
        tags: issue.labels.join(","),
        new_comment_url,
        header,
        body,
    };

    let contents = renderer.render_post(&view)?;
    Ok(RenderedFile::new(post_path(issue), contents))
}

/// Escapes a title for a YAML double-quoted scalar.
fn escape_title(title: &str) -> String {
    title.replace('\\', "\\\\").replace('"', "\\\"")
}
