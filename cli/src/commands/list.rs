//! # sdkport List Command
//!
//! File: cli/src/commands/list.rs
//!
//! Implements `sdkport list`: every `SDKReference` item of the project with the
//! folder it resolves to and whether that folder is already inside the solution.
//!
use super::{ProjectArgs, Workspace};
use crate::common::paths;
use crate::common::selection;
use crate::core::error::{Result, SdkPortError};
use crate::core::reference::ReferenceKind;
use clap::Parser;
use tracing::info;

/// Arguments for `sdkport list`.
#[derive(Parser, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn handle_list(args: ListArgs) -> Result<()> {
    let workspace = Workspace::resolve(&args.project)?;
    let project = workspace
        .accessor()
        .load(&workspace.project)?
        .ok_or_else(|| SdkPortError::ProjectNotFound(workspace.project.clone()))?;

    let sdk_items: Vec<_> = project
        .items()
        .iter()
        .filter(|item| ReferenceKind::from_item_type(&item.item_type) == ReferenceKind::ExtensionSdk)
        .collect();
    info!(
        "{} Extension SDK reference(s) in {}",
        sdk_items.len(),
        project.path().display()
    );
    if sdk_items.is_empty() {
        println!("No Extension SDK references in {}", project.path().display());
        return Ok(());
    }

    for item in sdk_items {
        match selection::locate_sdk(&project, &item.include) {
            Some(location) => {
                let state = if paths::is_within(&location, &workspace.solution_dir) {
                    "local"
                } else {
                    "global"
                };
                println!("{:<7} {}  ->  {}", state, item.include, location.display());
            }
            None => println!("{:<7} {}", "missing", item.include),
        }
    }
    Ok(())
}
