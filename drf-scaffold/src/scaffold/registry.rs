//! Route table and module registry edits
//!
//! Both shared files are long-lived and may already contain entries written
//! by earlier runs. The edits built here only ever add what is missing.

use std::path::PathBuf;

use serde_json::json;

use super::descriptor::ModuleDescriptor;
use super::patcher::{EditLog, TextEdit};
use crate::config::ScaffoldConfig;
use crate::error::Result;
use crate::templates::{TemplateRenderer, ROUTE_INCLUDE};

/// Which shared file an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharedFileKind {
    /// Global route table
    RouteTable,
    /// Module registry list
    Registry,
}

/// Edit of a shared project file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFileEdit {
    /// Which shared file this is
    pub kind: SharedFileKind,
    /// File path relative to the project root
    pub target_file: PathBuf,
    /// Import that must be present, if any
    pub required_import_line: Option<String>,
    /// Fragment that must be present exactly once
    pub required_fragment: String,
    /// Literal marker the fragment is inserted after
    pub insertion_anchor: String,
}

impl SharedFileEdit {
    /// Route registration for `module` in the global route table
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment fails to render.
    pub fn route_table(
        renderer: &TemplateRenderer,
        module: &ModuleDescriptor,
        config: &ScaffoldConfig,
    ) -> Result<Self> {
        let fragment = renderer.render(
            ROUTE_INCLUDE,
            &json!({
                "app_name": module.name(),
                "app_import_path": module.import_path(),
            }),
        )?;

        Ok(Self {
            kind: SharedFileKind::RouteTable,
            target_file: config.routes.file.clone(),
            required_import_line: Some(config.routes.import_line.clone()),
            required_fragment: fragment,
            insertion_anchor: config.routes.anchor.clone(),
        })
    }

    /// Registration of `module` in the registry list
    #[must_use]
    pub fn registry(module: &ModuleDescriptor, config: &ScaffoldConfig) -> Self {
        Self {
            kind: SharedFileKind::Registry,
            target_file: config.registry.file.clone(),
            required_import_line: None,
            required_fragment: format!("\"{}\"", module.import_path()),
            insertion_anchor: config.registry.anchor(),
        }
    }

    /// Edits that bring the file up to date
    ///
    /// Route table: prepend the import, then insert the fragment at the top
    /// of the route list, or append a new list when there is none.
    ///
    /// Registry: append an empty list when there is none, then insert the
    /// quoted import path at the top of it.
    #[must_use]
    pub fn edit_log(&self) -> EditLog {
        let anchor = &self.insertion_anchor;
        let fragment = &self.required_fragment;
        let mut log = EditLog::new();

        if let Some(import) = &self.required_import_line {
            log.push(TextEdit::PrependIfAbsent {
                line: import.clone(),
            });
        }

        match self.kind {
            SharedFileKind::RouteTable => log.with(TextEdit::InsertAfterAnchor {
                anchor: anchor.clone(),
                needle: fragment.clone(),
                fragment: format!("\n    {fragment},"),
                fallback: Some(format!("\n{anchor}\n    {fragment},\n]\n")),
            }),
            SharedFileKind::Registry => log
                .with(TextEdit::AppendIfAbsent {
                    needle: anchor.clone(),
                    text: format!("\n{anchor}]\n"),
                })
                .with(TextEdit::InsertAfterAnchor {
                    anchor: anchor.clone(),
                    needle: fragment.clone(),
                    fragment: format!("\n    {fragment},"),
                    fallback: None,
                }),
        }
    }

    /// Apply this edit to the current file content
    #[must_use]
    pub fn apply(&self, content: &str) -> String {
        self.edit_log().apply(content)
    }
}
