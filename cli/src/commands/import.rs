//! # sdkport Import Command
//!
//! File: cli/src/commands/import.rs
//!
//! ## Overview
//!
//! Implements `sdkport import`, the command-line counterpart of the IDE's
//! "import Extension SDK" action. It wires the command-line adapters (reference
//! selection, project files on disk, the folder prompt, console notifications)
//! into the `Importer` and reports how the run ended.
//!
//! ## Examples
//!
//! ```bash
//! # Ask where to put the SDK
//! sdkport import --project App/App.csproj --reference SQLite.WinRT81
//!
//! # Non-interactive, into <solution>/libs
//! sdkport import -p App/App.csproj -r "SQLite.WinRT81, Version=3.8.7.4" --root libs
//! ```
//!
use super::{ProjectArgs, ReferenceArgs, Workspace};
use crate::common::selection::ProjectItemSelection;
use crate::common::ui::{ConsoleNotifier, PromptFolderPicker};
use crate::core::error::Result;
use crate::core::importer::{ImportOutcome, Importer};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Arguments for `sdkport import`.
#[derive(Parser, Debug)]
pub struct ImportArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Folder to import the SDK into, skipping the prompt.
    #[arg(long, value_name = "DIR", conflicts_with = "yes")]
    pub root: Option<PathBuf>,

    /// Accept the default folder without prompting.
    #[arg(short, long)]
    pub yes: bool,
}

/// Runs the import and returns its outcome; failures were already reported.
pub fn handle_import(args: ImportArgs) -> Result<ImportOutcome> {
    let workspace = Workspace::resolve(&args.project)?;
    let accessor = workspace.accessor();
    let selection = ProjectItemSelection::new(
        &accessor,
        &workspace.project,
        &args.reference.reference,
        args.reference.sdk_path.clone(),
    );
    let picker = PromptFolderPicker::new(
        args.root,
        args.yes,
        workspace.config.default_import_root(&workspace.solution_dir),
    );
    let notifier = ConsoleNotifier;

    let importer = Importer::new(&selection, &accessor, &picker, &notifier);
    let outcome = importer.run(&workspace.solution_dir)?;
    info!("Import finished: {:?}", outcome);
    report(&outcome, &args.reference.reference);
    Ok(outcome)
}

/// Follow-up lines for the CLI; the importer's own notifications are already printed.
fn report(outcome: &ImportOutcome, reference: &str) {
    match outcome {
        ImportOutcome::NotApplicable => {
            println!("'{}' is not an Extension SDK reference; nothing to do.", reference)
        }
        ImportOutcome::NothingToConvert => {
            println!("'{}' has no Extension SDK manifest; nothing to convert.", reference)
        }
        ImportOutcome::Cancelled => println!("Import cancelled."),
        ImportOutcome::ProjectNotFound { project } => {
            warn!("Project {} could not be loaded", project.display())
        }
        ImportOutcome::AlreadyImported { destination } => {
            debug!("SDK already present at {}", destination.display())
        }
        ImportOutcome::Imported {
            destination,
            copied,
            project_updated,
        } => {
            if *copied {
                println!("Copied SDK to {}", destination.display());
            }
            if *project_updated {
                println!("Updated SDKReferenceDirectoryRoot in the project file.");
            }
        }
        ImportOutcome::CopyFailed { destination } => {
            eprintln!(
                "{} may hold a partial copy of the SDK; remove it before retrying.",
                destination.display()
            );
        }
        ImportOutcome::SaveFailed {
            destination,
            copied,
        } => {
            if *copied {
                eprintln!(
                    "The SDK was copied to {} but the project file was not updated.",
                    destination.display()
                );
            }
        }
    }
}
