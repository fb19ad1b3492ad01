//! Template directory copier
//!
//! The template tree is treated as opaque: every directory and file is
//! reproduced byte-for-byte under the destination.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};

/// Summary of a completed copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Directories created, including the destination itself
    pub directories: usize,
    /// Files copied
    pub files: usize,
}

/// Copies the module template to a new destination
#[derive(Debug, Clone)]
pub struct TemplateCopier {
    template_dir: PathBuf,
}

impl TemplateCopier {
    /// Create a copier for the given template directory
    #[must_use]
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
        }
    }

    /// Fail unless the template directory exists
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateMissing`] if it is absent or not a directory.
    pub fn ensure_template(&self) -> Result<()> {
        if self.template_dir.is_dir() {
            Ok(())
        } else {
            Err(ScaffoldError::TemplateMissing(self.template_dir.clone()))
        }
    }

    /// Fail if the destination is already on disk
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::DestinationExists`] if anything exists at `destination`.
    pub fn ensure_destination_available(name: &str, destination: &Path) -> Result<()> {
        // symlink_metadata so a dangling link still counts as taken
        if fs::symlink_metadata(destination).is_ok() {
            return Err(ScaffoldError::DestinationExists {
                name: name.to_string(),
                path: destination.to_path_buf(),
            });
        }
        Ok(())
    }

    /// Read a file from the template, `None` if the template does not ship it
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn read_template_file(&self, relative: &str) -> Result<Option<String>> {
        let path = self.template_dir.join(relative);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ScaffoldError::io(path, err)),
        }
    }

    /// Recursively copy the template to `destination`
    ///
    /// Missing parent directories are created. The destination itself must
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The destination already exists
    /// - The template directory is missing
    /// - Any directory creation or file copy fails
    pub fn copy_to(&self, name: &str, destination: &Path) -> Result<CopyReport> {
        self.ensure_template()?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
        }
        fs::create_dir(destination).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                ScaffoldError::DestinationExists {
                    name: name.to_string(),
                    path: destination.to_path_buf(),
                }
            } else {
                ScaffoldError::io(destination, e)
            }
        })?;

        let mut report = CopyReport {
            directories: 1,
            files: 0,
        };

        // Links are followed: the copy holds real files and directories
        for entry in WalkDir::new(&self.template_dir)
            .min_depth(1)
            .follow_links(true)
        {
            let entry = entry?;
            let Ok(relative) = entry.path().strip_prefix(&self.template_dir) else {
                continue;
            };
            let target = destination.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir(&target).map_err(|e| ScaffoldError::io(&target, e))?;
                report.directories += 1;
            } else {
                fs::copy(entry.path(), &target).map_err(|e| ScaffoldError::io(&target, e))?;
                report.files += 1;
            }
        }

        tracing::info!(
            template = %self.template_dir.display(),
            destination = %destination.display(),
            files = report.files,
            directories = report.directories,
            "copied module template"
        );

        Ok(report)
    }
}
