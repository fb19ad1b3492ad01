//! Module identifiers derived from the name typed on the command line

use std::path::{Path, PathBuf};

use super::helpers::TemplateHelpers;
use crate::error::{Result, ScaffoldError};

/// Where the new module is placed inside the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Directly under the project root
    #[default]
    Standard,
    /// Under the configured source root (`src/` by default)
    Nested,
}

impl Placement {
    /// Placement from the `--src` flag
    #[must_use]
    pub const fn from_flag(nested: bool) -> Self {
        if nested {
            Self::Nested
        } else {
            Self::Standard
        }
    }
}

/// Identity of the module being created
///
/// Built once per run by [`ModuleDescriptor::derive`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    name: String,
    placement: Placement,
    relative_path: PathBuf,
    destination: PathBuf,
    import_path: String,
    config_class_name: String,
}

impl ModuleDescriptor {
    /// Derive the destination, import path and config class name
    ///
    /// # Arguments
    ///
    /// * `project_root` - Directory the module is created under
    /// * `name` - Module name as typed by the user
    /// * `placement` - Standard or nested placement
    /// * `source_root` - Segment used for nested placement
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidInput`] if the name is empty.
    pub fn derive(
        project_root: &Path,
        name: &str,
        placement: Placement,
        source_root: &str,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScaffoldError::InvalidInput(
                "module name must not be empty".to_string(),
            ));
        }

        let segments: Vec<&str> = match placement {
            Placement::Standard => vec![name],
            Placement::Nested => vec![source_root, name],
        };

        let relative_path: PathBuf = segments.iter().filter(|s| !s.is_empty()).collect();
        let destination = project_root.join(&relative_path);
        let import_path = TemplateHelpers::to_import_path(&segments);
        let config_class_name = TemplateHelpers::to_config_class_name(name);

        tracing::debug!(
            module = name,
            import_path = %import_path,
            destination = %destination.display(),
            "derived module identifiers"
        );

        Ok(Self {
            name: name.to_string(),
            placement,
            relative_path,
            destination,
            import_path,
            config_class_name,
        })
    }

    /// Module name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Placement the module was derived with
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Destination relative to the project root
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Absolute destination directory
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Dotted import path (`blog`, `src.blog`)
    #[must_use]
    pub fn import_path(&self) -> &str {
        &self.import_path
    }

    /// Config class name (`BlogConfig`)
    #[must_use]
    pub fn config_class_name(&self) -> &str {
        &self.config_class_name
    }
}
