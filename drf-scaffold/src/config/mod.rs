//! Configuration for drf-scaffold
//!
//! Settings are layered with clear precedence:
//!
//! 1. Environment variables (highest priority, `DRF_SCAFFOLD_` prefix, `__`
//!    separates sections, e.g. `DRF_SCAFFOLD_ROUTES__FILE`)
//! 2. `<project root>/scaffold.toml`
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # scaffold.toml
//! template_dir = "app_template"
//! source_root = "src"
//!
//! [routes]
//! file = "core/urls.py"
//!
//! [registry]
//! file = "core/settings/base.py"
//! list_name = "LOCAL_APPS"
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ScaffoldError};

/// Name of the per-project configuration file
pub const CONFIG_FILE_NAME: &str = "scaffold.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "DRF_SCAFFOLD_";

/// Global route table settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RouteSettings {
    /// Route table file, relative to the project root
    pub file: PathBuf,

    /// Literal text that opens the route list
    pub anchor: String,

    /// Import line the route fragments depend on
    pub import_line: String,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("core/urls.py"),
            anchor: "urlpatterns = [".to_string(),
            import_line: "from django.urls import include, path".to_string(),
        }
    }
}

/// Module registry settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegistrySettings {
    /// Settings file holding the registry list, relative to the project root
    pub file: PathBuf,

    /// Name of the list variable (`LOCAL_APPS = [...]`)
    pub list_name: String,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("core/settings/base.py"),
            list_name: "LOCAL_APPS".to_string(),
        }
    }
}

impl RegistrySettings {
    /// Literal text that opens the registry list
    #[must_use]
    pub fn anchor(&self) -> String {
        format!("{} = [", self.list_name)
    }
}

/// Complete drf-scaffold configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Template directory copied for every new module, relative to the project root
    pub template_dir: PathBuf,

    /// Source root segment used with `--src`
    pub source_root: String,

    /// Module config file written into every new module
    pub module_config_file: String,

    /// Route table settings
    pub routes: RouteSettings,

    /// Registry settings
    pub registry: RegistrySettings,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("app_template"),
            source_root: "src".to_string(),
            module_config_file: "apps.py".to_string(),
            routes: RouteSettings::default(),
            registry: RegistrySettings::default(),
        }
    }
}

impl ScaffoldConfig {
    /// Load configuration for a project
    ///
    /// Reads `scaffold.toml` from `project_root` when present and applies
    /// `DRF_SCAFFOLD_*` environment overrides on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an override cannot be deserialized,
    /// or if a required setting is blank (see [`ScaffoldConfig::validate`]).
    pub fn load(project_root: &Path) -> Result<Self> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(project_root.join(CONFIG_FILE_NAME)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the shared-file edits produce broken code
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidInput`] naming the first blank setting.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("source_root", self.source_root.as_str()),
            ("module_config_file", self.module_config_file.as_str()),
            ("routes.anchor", self.routes.anchor.as_str()),
            ("routes.import_line", self.routes.import_line.as_str()),
            ("registry.list_name", self.registry.list_name.as_str()),
        ];

        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((key, _)) => Err(ScaffoldError::InvalidInput(format!(
                "configuration key `{key}` must not be empty"
            ))),
            None => Ok(()),
        }
    }
}
