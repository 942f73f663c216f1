//! # sdkport Status Command
//!
//! File: cli/src/commands/status.rs
//!
//! ## Overview
//!
//! Implements `sdkport status`: a dry run of `import` that prints every
//! decision the importer would make for a reference without prompting, copying
//! or saving anything.
//!
//! ## Example output
//!
//! ```text
//! Reference:        SQLite.WinRT81, Version=3.8.7.4
//! Kind:             ExtensionSDK
//! Location:         /home/me/sdks/Windows/v8.1/ExtensionSDKs/SQLite.WinRT81/3.8.7.4
//! Import offered:   yes
//! SDK:              SQLite.WinRT81 3.8.7.4 (Windows v8.1)
//! Manifest Id:      Microsoft.ExtensionSDK
//! Local root:       (none)
//! Root:             /src/Demo
//! Destination:      /src/Demo/Windows/v8.1/ExtensionSDKs/SQLite.WinRT81/3.8.7.4
//! Already imported: no
//! ```
//!
use super::{ProjectArgs, ReferenceArgs, Workspace};
use crate::common::msbuild::SDK_ROOT_PROPERTY;
use crate::common::paths;
use crate::common::selection::ProjectItemSelection;
use crate::core::error::{Result, SdkPortError};
use crate::core::host::SelectionSource;
use crate::core::manifest;
use crate::core::overrides::OverrideState;
use crate::core::planner::ImportPlan;
use crate::core::reference;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

/// Arguments for `sdkport status`.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Root to plan against when the project declares none.
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

pub fn handle_status(args: StatusArgs) -> Result<()> {
    let workspace = Workspace::resolve(&args.project)?;
    let accessor = workspace.accessor();
    let selection = ProjectItemSelection::new(
        &accessor,
        &workspace.project,
        &args.reference.reference,
        args.reference.sdk_path.clone(),
    )
    .current_selection()?;

    print_row("Reference", &args.reference.reference);
    let Some(selected) = &selection else {
        print_row("Kind", "(not found)");
        print_row("Import offered", "no");
        return Ok(());
    };
    print_row("Kind", &selected.kind.to_string());
    print_row("Location", &selected.source_path.display().to_string());
    let offered = reference::is_import_offered(selection.as_ref(), Some(&workspace.solution_dir));
    print_row("Import offered", yes_no(offered));

    let Some(reference) = reference::as_extension_sdk(selection) else {
        return Ok(());
    };
    let project = accessor
        .load(&workspace.project)?
        .ok_or_else(|| SdkPortError::ProjectNotFound(workspace.project.clone()))?;
    let overrides = OverrideState::resolve(project.property(SDK_ROOT_PROPERTY));

    let Some(manifest) = manifest::read_manifest(&reference.source_path)? else {
        print_row("SDK", "(no manifest)");
        return Ok(());
    };
    print_row(
        "SDK",
        &format!(
            "{} {} ({} {})",
            manifest.sdk_name,
            manifest.sdk_version,
            manifest.target_platform_identifier,
            manifest.target_platform_version
        ),
    );
    print_row("Manifest Id", &manifest.id);
    print_row(
        "Local root",
        overrides.solution_root.as_deref().unwrap_or("(none)"),
    );

    let root = match (&overrides.solution_root, args.root) {
        (Some(root), _) => paths::to_native(root),
        (None, Some(root)) => root,
        (None, None) => workspace
            .config
            .default_import_root(&workspace.solution_dir)
            .unwrap_or_else(|| workspace.solution_dir.clone()),
    };
    let root = paths::absolutize(&root)
        .with_context(|| format!("Invalid root {}", root.display()))?;
    let plan = ImportPlan::new(&root, &manifest, &overrides);
    print_row("Root", &root.display().to_string());
    print_row("Destination", &plan.destination.display().to_string());
    print_row("Already imported", yes_no(plan.is_already_imported()));
    Ok(())
}

fn print_row(label: &str, value: &str) {
    println!("{:<18}{}", format!("{}:", label), value);
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
