//! drf-scaffold CLI tool

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use drf_scaffold::commands::{EntityArgs, StartAppCommand};
use drf_scaffold::observability;

#[derive(Parser)]
#[command(name = "drf-scaffold")]
#[command(version)]
#[command(about = "Scaffold Django REST Framework apps", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new app from the app template and register it
    Startapp {
        /// Name of the new app
        name: String,
        /// Create the app inside the source directory
        #[arg(long)]
        src: bool,
        /// Project root (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        project_root: Option<PathBuf>,
        /// Print the changes without writing anything
        #[arg(long)]
        dry_run: bool,
        #[command(flatten)]
        entity: EntityArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose)?;

    match cli.command {
        Commands::Startapp {
            name,
            src,
            project_root,
            dry_run,
            entity,
        } => {
            let project_root = match project_root {
                Some(root) => root,
                None => std::env::current_dir().context("Failed to get current directory")?,
            };
            let cmd = StartAppCommand::new(name, src, project_root, entity, dry_run);
            cmd.execute()?;
        }
    }

    Ok(())
}
