//! Code generator for a module's entity
//!
//! Turns an [`EntitySpec`] into the four fragments written into the new
//! module (model, serializer, viewset, route table) and renders the module
//! config file.

use serde_json::json;

use super::descriptor::ModuleDescriptor;
use super::entity::EntitySpec;
use super::patcher::{EditLog, TextEdit};
use crate::error::Result;
use crate::templates::{
    TemplateRenderer, APPS_TEMPLATE, EMPTY_FIELDS, FALLBACK_FIRST_FIELD, FIELD_LINE, MODEL_IMPORT,
    MODEL_TEMPLATE, SERIALIZER_IMPORT, SERIALIZER_TEMPLATE, URLS_TEMPLATE, VIEWSET_TEMPLATE,
    VIEW_IMPORT,
};

/// How a fragment lands in its target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Append after a guarded import line
    Append,
    /// Replace the whole file
    Overwrite,
}

/// A rendered piece of code and where it goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFragment {
    /// File name inside the module directory
    pub target_file: String,
    /// Import the body depends on, written at most once per file
    pub import_line: Option<String>,
    /// Rendered code
    pub body: String,
    /// Append or overwrite
    pub mode: WriteMode,
    /// Description for user feedback
    pub description: String,
}

impl GeneratedFragment {
    /// Edits that apply this fragment to its target file
    #[must_use]
    pub fn edit_log(&self) -> EditLog {
        match self.mode {
            WriteMode::Overwrite => EditLog::new().with(TextEdit::Overwrite {
                content: self.body.clone(),
            }),
            WriteMode::Append => {
                let mut log = EditLog::new();
                if let Some(import) = &self.import_line {
                    log.push(TextEdit::ensure_import(import));
                }
                log.with(TextEdit::Append {
                    text: self.body.clone(),
                })
            }
        }
    }
}

/// Renders the config file for a module
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn generate_module_config(
    renderer: &TemplateRenderer,
    module: &ModuleDescriptor,
    target_file: &str,
) -> Result<GeneratedFragment> {
    let body = renderer.render(
        APPS_TEMPLATE,
        &json!({
            "app_class_name": module.config_class_name(),
            "app_import_path": module.import_path(),
        }),
    )?;

    Ok(GeneratedFragment {
        target_file: target_file.to_string(),
        import_line: None,
        body,
        mode: WriteMode::Overwrite,
        description: format!("{} for {}", module.config_class_name(), module.name()),
    })
}

/// Entity code generator
pub struct CodeGenerator<'a> {
    module: &'a ModuleDescriptor,
    entity: &'a EntitySpec,
    renderer: &'a TemplateRenderer,
}

impl<'a> CodeGenerator<'a> {
    /// Create a generator for `entity` inside `module`
    #[must_use]
    pub const fn new(
        module: &'a ModuleDescriptor,
        entity: &'a EntitySpec,
        renderer: &'a TemplateRenderer,
    ) -> Self {
        Self {
            module,
            entity,
            renderer,
        }
    }

    /// Generate model, serializer, viewset and route table fragments, in that order
    ///
    /// # Errors
    ///
    /// Returns an error if any template fails to render.
    pub fn generate(&self) -> Result<Vec<GeneratedFragment>> {
        Ok(vec![
            self.generate_model()?,
            self.generate_serializer()?,
            self.generate_viewset()?,
            self.generate_routes()?,
        ])
    }

    /// Template variables shared by every fragment
    fn metadata(&self) -> Result<serde_json::Value> {
        Ok(json!({
            "model_name": self.entity.name(),
            "model_name_lower": self.entity.route_segment(),
            "app_import_path": self.module.import_path(),
            "fields": self.field_block()?,
            "first_field": self.first_field(),
        }))
    }

    /// One declaration line per field, or `pass` for an empty entity
    fn field_block(&self) -> Result<String> {
        if self.entity.fields().is_empty() {
            return Ok(EMPTY_FIELDS.to_string());
        }

        let lines = self
            .entity
            .fields()
            .iter()
            .map(|field| self.renderer.render(FIELD_LINE, &json!({ "name": field.name })))
            .collect::<Result<Vec<_>>>()?;

        Ok(lines.join("\n"))
    }

    /// Attribute returned by `__str__`
    fn first_field(&self) -> &str {
        self.entity
            .fields()
            .first()
            .map_or(FALLBACK_FIRST_FIELD, |field| field.name.as_str())
    }

    fn generate_model(&self) -> Result<GeneratedFragment> {
        let body = self.renderer.render(MODEL_TEMPLATE, &self.metadata()?)?;

        Ok(GeneratedFragment {
            target_file: "models.py".to_string(),
            import_line: Some(MODEL_IMPORT.to_string()),
            body,
            mode: WriteMode::Append,
            description: format!("model {}", self.entity.name()),
        })
    }

    fn generate_serializer(&self) -> Result<GeneratedFragment> {
        let body = self.renderer.render(SERIALIZER_TEMPLATE, &self.metadata()?)?;

        Ok(GeneratedFragment {
            target_file: "serializers.py".to_string(),
            import_line: Some(SERIALIZER_IMPORT.to_string()),
            body,
            mode: WriteMode::Append,
            description: format!("serializer {}Serializer", self.entity.name()),
        })
    }

    fn generate_viewset(&self) -> Result<GeneratedFragment> {
        let body = self.renderer.render(VIEWSET_TEMPLATE, &self.metadata()?)?;

        Ok(GeneratedFragment {
            target_file: "views.py".to_string(),
            import_line: Some(VIEW_IMPORT.to_string()),
            body,
            mode: WriteMode::Append,
            description: format!("viewset {}ViewSet", self.entity.name()),
        })
    }

    fn generate_routes(&self) -> Result<GeneratedFragment> {
        let body = self.renderer.render(URLS_TEMPLATE, &self.metadata()?)?;

        Ok(GeneratedFragment {
            target_file: "urls.py".to_string(),
            import_line: None,
            body,
            mode: WriteMode::Overwrite,
            description: format!("routes for /{}", self.entity.route_segment()),
        })
    }
}
