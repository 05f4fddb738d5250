//! Template renderer.

use super::{TemplateError, DEFAULT_COMMENT_TEMPLATE, DEFAULT_POST_TEMPLATE};
use handlebars::{no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;

const POST: &str = "post";
const COMMENT: &str = "comment";

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (post bodies are markdown, comment bodies HTML)
/// - Strict mode (catches missing variables)
/// - `eq` helper for equality comparisons
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();

    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_helper("eq", Box::new(eq_helper));

    hbs
}

/// Helper function for equality comparison in templates.
///
/// Usage: `{{#if (eq name "ghost")}}...{{/if}}`
fn eq_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param1 = h.param(0).and_then(|v| v.value().as_str());
    let param2 = h.param(1).and_then(|v| v.value().as_str());

    let result = match (param1, param2) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    };

    out.write(if result { "true" } else { "" })?;
    Ok(())
}

/// Renders post and comment files from registered layouts.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Creates a renderer with the built-in layouts.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to register.
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_templates(DEFAULT_POST_TEMPLATE, DEFAULT_COMMENT_TEMPLATE)
    }

    /// Creates a renderer with custom layouts.
    ///
    /// # Errors
    ///
    /// Returns an error if either template does not parse.
    pub fn with_templates(post: &str, comment: &str) -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(POST, post)?;
        handlebars.register_template_string(COMMENT, comment)?;
        Ok(Self { handlebars })
    }

    /// Renders a post file.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout references a missing variable.
    pub fn render_post<T: Serialize>(&self, data: &T) -> Result<String, TemplateError> {
        Ok(self.handlebars.render(POST, data)?)
    }

    /// Renders a comment file.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout references a missing variable.
    pub fn render_comment<T: Serialize>(&self, data: &T) -> Result<String, TemplateError> {
        Ok(self.handlebars.render(COMMENT, data)?)
    }
}
