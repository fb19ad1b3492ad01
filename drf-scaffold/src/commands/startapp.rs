//! App scaffold command
//!
//! Creates a new Django app from the project's app template and wires it
//! into the project. It:
//! - copies `app_template/` to the new app directory
//! - generates `apps.py` with the app config class
//! - optionally generates a model, serializer, viewset and `urls.py`
//! - registers the app's routes in `core/urls.py`
//! - adds the app to `LOCAL_APPS` in `core/settings/base.py`
//!
//! # Example
//!
//! ```bash
//! drf-scaffold startapp blog
//! drf-scaffold startapp blog --src --entity post --field title --field body
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use console::{style, Emoji};
use indicatif::{ProgressBar, ProgressStyle};
use similar::{ChangeTag, TextDiff};

use crate::config::ScaffoldConfig;
use crate::error::ScaffoldError;
use crate::scaffold::{
    collect_entity, CommitEvent, EntitySource, ModuleDescriptor, Placement, PlannedFile,
    ScaffoldPlan, ScriptedSource, SharedFileKind, TemplateCopier, TerminalSource,
};

static SUCCESS: Emoji<'_, '_> = Emoji("✓", "√");
static SKIPPED: Emoji<'_, '_> = Emoji("•", "-");
static ERROR: Emoji<'_, '_> = Emoji("✗", "x");
static SPARKLES: Emoji<'_, '_> = Emoji("✨", "*");

/// Answers to the model prompts given on the command line
#[derive(Debug, Clone, Default, Args)]
pub struct EntityArgs {
    /// Model to generate, skips the interactive prompts
    #[arg(long, value_name = "MODEL", conflicts_with = "no_entity")]
    pub entity: Option<String>,

    /// Model field, repeat for more (requires --entity)
    #[arg(long = "field", value_name = "FIELD", requires = "entity")]
    pub fields: Vec<String>,

    /// Do not generate a model and do not prompt
    #[arg(long)]
    pub no_entity: bool,
}

impl EntityArgs {
    /// Where the model answers come from
    #[must_use]
    pub fn source(&self) -> Box<dyn EntitySource> {
        if self.no_entity {
            Box::new(ScriptedSource::declined())
        } else if let Some(entity) = &self.entity {
            Box::new(ScriptedSource::entity(entity.clone(), self.fields.clone()))
        } else {
            Box::new(TerminalSource::new())
        }
    }
}

/// Create a new app and register it in the project
pub struct StartAppCommand {
    name: String,
    nested: bool,
    project_root: PathBuf,
    entity: EntityArgs,
    dry_run: bool,
}

impl StartAppCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `name` - App name
    /// * `nested` - Place the app under the source root
    /// * `project_root` - Django project root
    /// * `entity` - Model answers from the command line
    /// * `dry_run` - Print the changes instead of writing them
    #[must_use]
    pub const fn new(
        name: String,
        nested: bool,
        project_root: PathBuf,
        entity: EntityArgs,
        dry_run: bool,
    ) -> Self {
        Self {
            name,
            nested,
            project_root,
            entity,
            dry_run,
        }
    }

    /// Execute the command
    ///
    /// An existing app directory is reported and the command returns
    /// without touching anything.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration cannot be loaded
    /// - The app name or model name is empty
    /// - The template directory or a shared file is missing
    /// - Any file operation fails
    pub fn execute(&self) -> Result<()> {
        let config = ScaffoldConfig::load(&self.project_root)
            .context("Failed to load scaffold configuration")?;

        let module = ModuleDescriptor::derive(
            &self.project_root,
            &self.name,
            Placement::from_flag(self.nested),
            &config.source_root,
        )?;

        // Checked before prompting so the user is not asked for a model first
        if let Err(err) =
            TemplateCopier::ensure_destination_available(module.name(), module.destination())
        {
            Self::print_rejection(&err);
            return Ok(());
        }

        let mut source = self.entity.source();
        let entity = collect_entity(source.as_mut()).context("Failed to read model definition")?;

        let plan = match ScaffoldPlan::build(&self.project_root, &config, module, entity) {
            Err(err) if err.is_destination_exists() => {
                Self::print_rejection(&err);
                return Ok(());
            }
            result => result.context("Failed to prepare app scaffold")?,
        };

        if self.dry_run {
            Self::print_plan(&plan, &config);
            return Ok(());
        }

        if self.commit(&plan)? {
            Self::print_success(&plan);
        }
        Ok(())
    }

    fn print_rejection(err: &ScaffoldError) {
        eprintln!("{} {}", style(ERROR).red().bold(), style(err).red().bold());
    }

    /// Write the plan to disk, printing a line per completed step
    ///
    /// Returns `false` when the destination was created by someone else
    /// after planning; nothing is written in that case.
    fn commit(&self, plan: &ScaffoldPlan) -> Result<bool> {
        println!(
            "\n{} {} {}",
            style("Creating app").cyan().bold(),
            style(&self.name).green().bold(),
            style("...").cyan().bold()
        );

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .context("Failed to set progress style")?,
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("Copying app template...");

        let module = plan.module();
        let result = plan.commit(|event| {
            spinner.suspend(|| Self::print_event(module, &event));
            spinner.set_message("Writing files...");
        });
        spinner.finish_and_clear();

        match result {
            Err(err) if err.is_destination_exists() => {
                Self::print_rejection(&err);
                Ok(false)
            }
            result => result
                .map(|()| true)
                .with_context(|| format!("Failed to create app \"{}\"", self.name)),
        }
    }

    fn print_event(module: &ModuleDescriptor, event: &CommitEvent<'_>) {
        match event {
            CommitEvent::TemplateCopied {
                destination,
                report,
            } => println!(
                "  {} Created app directory {} ({} files)",
                style(SUCCESS).green(),
                style(destination.display()).cyan(),
                report.files
            ),
            CommitEvent::ModuleFileWritten(file) => println!(
                "  {} Generated {} {}",
                style(SUCCESS).green(),
                style(file.display_path.display()).cyan(),
                style(format!("({})", file.description)).dim()
            ),
            CommitEvent::SharedFileUpdated {
                kind,
                file,
                changed,
            } => {
                let what = match kind {
                    SharedFileKind::RouteTable => format!("routes for \"{}\"", module.name()),
                    SharedFileKind::Registry => format!("app \"{}\"", module.import_path()),
                };
                if *changed {
                    println!(
                        "  {} Added {what} to {}",
                        style(SUCCESS).green(),
                        style(file.display_path.display()).cyan()
                    );
                } else {
                    println!(
                        "  {} {} already has {what}",
                        style(SKIPPED).dim(),
                        style(file.display_path.display()).cyan()
                    );
                }
            }
        }
    }

    /// Show every change the run would make
    fn print_plan(plan: &ScaffoldPlan, config: &ScaffoldConfig) {
        println!(
            "\n{} {}",
            style("Dry run:").yellow().bold(),
            style("no files will be written").dim()
        );
        println!(
            "\n  Copy {} -> {}",
            style(config.template_dir.display()).cyan(),
            style(plan.module().relative_path().display()).cyan()
        );

        for file in plan.files() {
            if file.is_changed() {
                Self::print_diff(file);
            }
        }
    }

    fn print_diff(file: &PlannedFile) {
        println!(
            "\n{} {}",
            style(file.display_path.display()).bold(),
            style(format!("({})", file.description)).dim()
        );

        let diff = TextDiff::from_lines(file.original_text(), file.content.as_str());
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Delete => {
                    print!("{}", style(format!("-{change}")).red());
                }
                ChangeTag::Insert => {
                    print!("{}", style(format!("+{change}")).green());
                }
                ChangeTag::Equal => {
                    print!(" {change}");
                }
            }
        }
        println!();
    }

    /// Print success message with next steps
    fn print_success(plan: &ScaffoldPlan) {
        let module = plan.module();

        println!();
        if let Some(entity) = plan.entity() {
            println!(
                "{} Model {} and associated components created for {}",
                style(SPARKLES).green().bold(),
                style(entity.name()).green().bold(),
                style(module.import_path()).green().bold()
            );
        } else {
            println!(
                "{} App {} is ready!",
                style(SPARKLES).green().bold(),
                style(module.import_path()).green().bold()
            );
        }

        println!("\n{}", style("Next steps:").cyan().bold());
        println!(
            "  1. Create migrations: {}",
            style(format!("python manage.py makemigrations {}", module.name())).yellow()
        );
        println!("  2. Apply them: {}", style("python manage.py migrate").yellow());
    }
}
