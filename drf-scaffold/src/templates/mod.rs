//! Code template rendering

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;

pub mod files;
pub use files::*;

/// Renders the fixed code templates
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a renderer
    #[must_use]
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);

        Self { handlebars }
    }

    /// Render `template` with `context`
    ///
    /// # Errors
    ///
    /// Returns an error if the template is malformed.
    pub fn render<T: Serialize>(&self, template: &str, context: &T) -> Result<String> {
        Ok(self.handlebars.render_template(template, context)?)
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
