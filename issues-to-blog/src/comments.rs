//! Rendering issue comments into Jekyll data files.

use crate::github::Comment;
use crate::output::RenderedFile;
use crate::posts::format_timestamp;
use crate::templates::{TemplateError, TemplateRenderer};
use serde::Serialize;
use std::path::PathBuf;

/// Directory of generated comment records, relative to the working tree root.
pub const COMMENTS_DIR: &str = "_data/comments";

/// Indentation of each message line under the block-literal marker.
const MESSAGE_INDENT: &str = "    ";

/// Returns the record path for a comment.
///
/// Format: `_data/comments/issue-{issue_number}/{comment_id}.yml`
#[must_use]
pub fn comment_path(issue_number: u64, comment: &Comment) -> PathBuf {
    PathBuf::from(COMMENTS_DIR)
        .join(format!("issue-{issue_number}"))
        .join(format!("{}.yml", comment.id))
}

/// Variables available to the comment layout.
#[derive(Debug, Serialize)]
struct CommentView<'a> {
    id: &'a str,
    date: String,
    name: &'a str,
    avatar: &'a str,
    message: String,
}

/// Renders a comment of issue `issue_number` into a data file.
///
/// # Errors
///
/// Returns [`TemplateError`] if the layout cannot be rendered.
pub fn render_comment(
    issue_number: u64,
    comment: &Comment,
    renderer: &TemplateRenderer,
) -> Result<RenderedFile, TemplateError> {
    let view = CommentView {
        id: &comment.id,
        date: comment
            .published_at
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_default(),
        name: &comment.author_login,
        avatar: &comment.avatar_url,
        message: indent_message(&comment.body_html),
    };

    let contents = renderer.render_comment(&view)?;
    Ok(RenderedFile::new(comment_path(issue_number, comment), contents))
}

/// Puts every line of `body` on its own indented line.
///
/// Splits on `\n` only, so a trailing newline yields a final indented empty
/// line and carriage returns are preserved.
fn indent_message(body: &str) -> String {
    body.split('\n')
        .map(|line| format!("\n{MESSAGE_INDENT}{line}"))
        .collect()
}
