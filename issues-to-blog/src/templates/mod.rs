//! Layouts of the generated post and comment files.
//!
//! Both layouts are Handlebars templates so a blog can replace them; the
//! built-in ones reproduce the Jekyll layout byte for byte.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, TemplateRenderer};

/// Built-in post layout: front matter, a blank line, then the body.
///
/// The comment URL line is rendered inline so that an absent URL leaves no
/// empty line behind.
pub const DEFAULT_POST_TEMPLATE: &str = concat!(
    "---\n",
    "title: \"{{title}}\"\n",
    "date: {{date}}\n",
    "tags: [{{tags}}]\n",
    "{{#if new_comment_url}}new_comment_url: {{new_comment_url}}\n{{/if}}",
    "{{header}}\n",
    "---\n",
    "\n",
    "{{body}}",
);

/// Built-in comment layout. `message` already carries its indented lines.
pub const DEFAULT_COMMENT_TEMPLATE: &str = concat!(
    "id: {{id}}\n",
    "date: {{date}}\n",
    "name: {{name}}\n",
    "avatar: {{avatar}}\n",
    "message: |{{message}}",
);
