//! Error types for the scaffolding pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

/// Scaffolding error type
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The module destination is already on disk
    #[error("App directory \"{name}\" already exists at {}", .path.display())]
    DestinationExists {
        /// Module name as typed by the user
        name: String,
        /// Destination that was found
        path: PathBuf,
    },

    /// The template directory to copy from is missing
    #[error("Template directory not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    /// A shared project file that must be patched is missing
    #[error("Shared project file not found: {}", .0.display())]
    SharedFileMissing(PathBuf),

    /// User input that would produce malformed identifiers
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File or directory being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Walking the template tree failed
    #[error("Failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// Rendering a code template failed
    #[error("Template rendering error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Terminal prompt failed
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl ScaffoldError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is the clean "destination already exists" rejection
    #[must_use]
    pub const fn is_destination_exists(&self) -> bool {
        matches!(self, Self::DestinationExists { .. })
    }
}

impl From<figment::Error> for ScaffoldError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
