//! Staged scaffolding
//!
//! [`ScaffoldPlan::build`] computes the final content of every file the run
//! will touch and checks every precondition without writing anything.
//! [`ScaffoldPlan::commit`] then copies the template and writes the buffers.
//! The commit is not atomic across files: a failure part-way leaves earlier
//! writes on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::copier::{CopyReport, TemplateCopier};
use super::descriptor::ModuleDescriptor;
use super::entity::EntitySpec;
use super::generator::{generate_module_config, CodeGenerator, GeneratedFragment};
use super::registry::{SharedFileEdit, SharedFileKind};
use crate::config::ScaffoldConfig;
use crate::error::{Result, ScaffoldError};
use crate::templates::TemplateRenderer;

/// A file whose final content has been computed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Absolute path to write
    pub path: PathBuf,
    /// Path relative to the project root, for display
    pub display_path: PathBuf,
    /// Content before the run, `None` for a new file
    pub original: Option<String>,
    /// Content after the run
    pub content: String,
    /// Description for user feedback
    pub description: String,
}

impl PlannedFile {
    /// Whether the run changes this file
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.original.as_deref() != Some(self.content.as_str())
    }

    /// Content before the run, empty for a new file
    #[must_use]
    pub fn original_text(&self) -> &str {
        self.original.as_deref().unwrap_or_default()
    }

    fn write(&self) -> Result<()> {
        fs::write(&self.path, &self.content).map_err(|e| ScaffoldError::io(&self.path, e))
    }
}

/// Progress reported while committing
#[derive(Debug)]
pub enum CommitEvent<'a> {
    /// The template tree was copied to the destination
    TemplateCopied {
        /// Module directory created
        destination: &'a Path,
        /// What was copied
        report: CopyReport,
    },
    /// A file inside the new module was written
    ModuleFileWritten(&'a PlannedFile),
    /// A shared project file was processed
    SharedFileUpdated {
        /// Which shared file
        kind: SharedFileKind,
        /// Planned content
        file: &'a PlannedFile,
        /// False when the file already had every entry
        changed: bool,
    },
}

/// Every file change for one run, computed up front
#[derive(Debug)]
pub struct ScaffoldPlan {
    module: ModuleDescriptor,
    entity: Option<EntitySpec>,
    copier: TemplateCopier,
    module_files: Vec<PlannedFile>,
    shared_files: Vec<(SharedFileKind, PlannedFile)>,
}

impl ScaffoldPlan {
    /// Compute all file contents for creating `module`
    ///
    /// Nothing is written. Module files start from the template's copy of the
    /// same file (or empty when the template does not ship it); shared files
    /// start from their current content on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The destination already exists
    /// - The template directory or a shared file is missing
    /// - A file cannot be read or a template fails to render
    pub fn build(
        project_root: &Path,
        config: &ScaffoldConfig,
        module: ModuleDescriptor,
        entity: Option<EntitySpec>,
    ) -> Result<Self> {
        let copier = TemplateCopier::new(project_root.join(&config.template_dir));
        copier.ensure_template()?;
        TemplateCopier::ensure_destination_available(module.name(), module.destination())?;

        let renderer = TemplateRenderer::new();

        let mut fragments = vec![generate_module_config(
            &renderer,
            &module,
            &config.module_config_file,
        )?];
        if let Some(entity) = &entity {
            fragments.extend(CodeGenerator::new(&module, entity, &renderer).generate()?);
        }

        let mut module_files: Vec<PlannedFile> = Vec::with_capacity(fragments.len());
        for fragment in &fragments {
            Self::plan_module_file(&copier, &module, fragment, &mut module_files)?;
        }

        let shared_edits = [
            SharedFileEdit::route_table(&renderer, &module, config)?,
            SharedFileEdit::registry(&module, config),
        ];
        let mut shared_files = Vec::with_capacity(shared_edits.len());
        for edit in &shared_edits {
            shared_files.push((edit.kind, Self::plan_shared_file(project_root, edit)?));
        }

        tracing::debug!(
            module = module.name(),
            module_files = module_files.len(),
            shared_files = shared_files.len(),
            "scaffold plan ready"
        );

        Ok(Self {
            module,
            entity,
            copier,
            module_files,
            shared_files,
        })
    }

    /// Fold `fragment` into the planned content of its target file
    fn plan_module_file(
        copier: &TemplateCopier,
        module: &ModuleDescriptor,
        fragment: &GeneratedFragment,
        planned: &mut Vec<PlannedFile>,
    ) -> Result<()> {
        if let Some(existing) = planned
            .iter_mut()
            .find(|file| file.display_path == module.relative_path().join(&fragment.target_file))
        {
            existing.content = fragment.edit_log().apply(&existing.content);
            existing.description = format!("{}, {}", existing.description, fragment.description);
            return Ok(());
        }

        let original = copier.read_template_file(&fragment.target_file)?;
        let content = fragment
            .edit_log()
            .apply(original.as_deref().unwrap_or_default());

        planned.push(PlannedFile {
            path: module.destination().join(&fragment.target_file),
            display_path: module.relative_path().join(&fragment.target_file),
            original,
            content,
            description: fragment.description.clone(),
        });
        Ok(())
    }

    fn plan_shared_file(project_root: &Path, edit: &SharedFileEdit) -> Result<PlannedFile> {
        let path = project_root.join(&edit.target_file);
        let original = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ScaffoldError::SharedFileMissing(path.clone())
            } else {
                ScaffoldError::io(&path, e)
            }
        })?;
        let content = edit.apply(&original);

        Ok(PlannedFile {
            path,
            display_path: edit.target_file.clone(),
            original: Some(original),
            content,
            description: edit.required_fragment.clone(),
        })
    }

    /// Module being created
    #[must_use]
    pub const fn module(&self) -> &ModuleDescriptor {
        &self.module
    }

    /// Entity being generated, if any
    #[must_use]
    pub const fn entity(&self) -> Option<&EntitySpec> {
        self.entity.as_ref()
    }

    /// Files written inside the new module
    #[must_use]
    pub fn module_files(&self) -> &[PlannedFile] {
        &self.module_files
    }

    /// Planned content of a shared file
    #[must_use]
    pub fn shared_file(&self, kind: SharedFileKind) -> Option<&PlannedFile> {
        self.shared_files
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, file)| file)
    }

    /// Every planned file, module files first
    pub fn files(&self) -> impl Iterator<Item = &PlannedFile> {
        self.module_files
            .iter()
            .chain(self.shared_files.iter().map(|(_, file)| file))
    }

    /// Copy the template and write every planned file
    ///
    /// `on_event` is called after each completed step. Unchanged shared files
    /// are not rewritten.
    ///
    /// # Errors
    ///
    /// Returns the first failure; steps already completed are not rolled back.
    pub fn commit<F>(&self, mut on_event: F) -> Result<()>
    where
        F: FnMut(CommitEvent<'_>),
    {
        let destination = self.module.destination();
        let report = self.copier.copy_to(self.module.name(), destination)?;
        on_event(CommitEvent::TemplateCopied {
            destination,
            report,
        });

        for file in &self.module_files {
            file.write()?;
            tracing::info!(path = %file.path.display(), "wrote module file");
            on_event(CommitEvent::ModuleFileWritten(file));
        }

        for (kind, file) in &self.shared_files {
            let changed = file.is_changed();
            if changed {
                file.write()?;
                tracing::info!(path = %file.path.display(), "updated shared file");
            } else {
                tracing::info!(path = %file.path.display(), "shared file already up to date");
            }
            on_event(CommitEvent::SharedFileUpdated {
                kind: *kind,
                file,
                changed,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::descriptor::Placement;
    use tempfile::{tempdir, TempDir};

    fn project() -> TempDir {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("app_template")).unwrap();
        fs::write(root.join("app_template/models.py"), "# models\n").unwrap();
        fs::create_dir_all(root.join("core/settings")).unwrap();
        fs::write(root.join("core/urls.py"), "urlpatterns = [\n]\n").unwrap();
        fs::write(root.join("core/settings/base.py"), "LOCAL_APPS = [\n]\n").unwrap();
        temp_dir
    }

    fn blog(root: &Path) -> ModuleDescriptor {
        ModuleDescriptor::derive(root, "blog", Placement::Standard, "src").unwrap()
    }

    #[test]
    fn test_build_writes_nothing() {
        let temp_dir = project();
        let root = temp_dir.path();
        let entity = EntitySpec::new("post", ["title"]).unwrap();

        let plan = ScaffoldPlan::build(root, &ScaffoldConfig::default(), blog(root), Some(entity))
            .unwrap();

        assert!(!root.join("blog").exists());
        assert_eq!(fs::read_to_string(root.join("core/urls.py")).unwrap(), "urlpatterns = [\n]\n");
        assert_eq!(plan.module_files().len(), 5);
        assert_eq!(plan.files().count(), 7);
    }

    #[test]
    fn test_module_file_starts_from_template() {
        let temp_dir = project();
        let root = temp_dir.path();
        let entity = EntitySpec::new("post", ["title"]).unwrap();
        let plan = ScaffoldPlan::build(root, &ScaffoldConfig::default(), blog(root), Some(entity))
            .unwrap();

        let models = plan
            .module_files()
            .iter()
            .find(|f| f.display_path == Path::new("blog/models.py"))
            .unwrap();
        assert_eq!(models.original.as_deref(), Some("# models\n"));
        assert!(models.content.starts_with("# models\n\nfrom django.db import models\n"));

        let views = plan
            .module_files()
            .iter()
            .find(|f| f.display_path == Path::new("blog/views.py"))
            .unwrap();
        assert_eq!(views.original, None);
        assert!(views.is_changed());
    }

    #[test]
    fn test_missing_shared_file_fails_before_writing() {
        let temp_dir = project();
        let root = temp_dir.path();
        fs::remove_file(root.join("core/settings/base.py")).unwrap();

        let result = ScaffoldPlan::build(root, &ScaffoldConfig::default(), blog(root), None);

        assert!(matches!(result, Err(ScaffoldError::SharedFileMissing(_))));
        assert!(!root.join("blog").exists());
    }

    #[test]
    fn test_commit_reports_every_step() {
        let temp_dir = project();
        let root = temp_dir.path();
        let plan = ScaffoldPlan::build(root, &ScaffoldConfig::default(), blog(root), None).unwrap();

        let mut copied = 0;
        let mut written = Vec::new();
        let mut shared = Vec::new();
        plan.commit(|event| match event {
            CommitEvent::TemplateCopied { .. } => copied += 1,
            CommitEvent::ModuleFileWritten(file) => written.push(file.display_path.clone()),
            CommitEvent::SharedFileUpdated { kind, changed, .. } => shared.push((kind, changed)),
        })
        .unwrap();

        assert_eq!(copied, 1);
        assert_eq!(written, [PathBuf::from("blog/apps.py")]);
        assert_eq!(
            shared,
            [(SharedFileKind::RouteTable, true), (SharedFileKind::Registry, true)]
        );
        assert!(root.join("blog/models.py").is_file());
    }

    #[test]
    fn test_unchanged_shared_file_reported() {
        let temp_dir = project();
        let root = temp_dir.path();
        fs::write(
            root.join("core/settings/base.py"),
            "LOCAL_APPS = [\n    \"blog\",\n]\n",
        )
        .unwrap();

        let plan = ScaffoldPlan::build(root, &ScaffoldConfig::default(), blog(root), None).unwrap();
        let registry = plan.shared_file(SharedFileKind::Registry).unwrap();
        assert!(!registry.is_changed());
    }
}
