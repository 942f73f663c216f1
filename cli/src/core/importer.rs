//! # Extension SDK Importer
//!
//! File: cli/src/core/importer.rs
//!
//! ## Overview
//!
//! The one operation sdkport exists for: take the selected Extension SDK
//! reference, copy the SDK into a root inside the solution, and make the
//! project resolve SDK references from that root.
//!
//! ## Flow
//!
//! 1. Ignore anything that is not an Extension SDK reference.
//! 2. Open the owning project. Failing to find it is reported as critical.
//! 3. Resolve a solution-local root already declared by the project.
//! 4. Read the SDK manifest. No manifest means nothing to convert.
//! 5. Without a declared root, ask the user for one. Cancelling stops here.
//! 6. Plan the destination; stop if the SDK is already imported.
//! 7. Mirror the SDK unless the destination already exists.
//! 8. Unless the root is already registered, append an override property
//!    group and save the project.
//!
//! Nothing is written before step 7, so every early exit leaves the project and
//! the filesystem untouched. A failed copy is reported and the project is not
//! patched. Steps 7 and 8 are not transactional: a failed save is reported and
//! the copied SDK stays in place.
//!
use crate::common::fs::copy;
use crate::common::msbuild::{ProjectProperty, SDK_ROOT_PROPERTY, SOLUTION_DIR_TOKEN};
use crate::common::paths;
use crate::core::error::{Result, SdkPortError};
use crate::core::host::{FolderPicker, Notifier, ProjectAccessor, SelectionSource};
use crate::core::manifest::{self, SdkManifest};
use crate::core::overrides::OverrideState;
use crate::core::planner::ImportPlan;
use crate::core::reference;
use anyhow::Context;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use tracing::{debug, info, warn};

/// Text shown by the folder prompt.
pub const FOLDER_PROMPT: &str =
    "Pick / create a folder in which to store the SDK, e.g. a libs folder beside the solution file";

/// How an import run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// No selection, or the selection is not an Extension SDK.
    NotApplicable,
    /// The owning project could not be located.
    ProjectNotFound { project: PathBuf },
    /// The SDK folder has no usable manifest.
    NothingToConvert,
    /// The user dismissed the folder prompt.
    Cancelled,
    AlreadyImported { destination: PathBuf },
    Imported {
        destination: PathBuf,
        copied: bool,
        project_updated: bool,
    },
    /// Mirroring the SDK failed; the destination may be partially written.
    CopyFailed { destination: PathBuf },
    /// Files may have been copied but the project could not be saved.
    SaveFailed { destination: PathBuf, copied: bool },
}

impl ImportOutcome {
    /// Outcomes that were reported to the user as critical.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ProjectNotFound { .. } | Self::CopyFailed { .. } | Self::SaveFailed { .. })
    }
}

/// Runs the import against injected host capabilities.
pub struct Importer<'a> {
    selection: &'a dyn SelectionSource,
    projects: &'a dyn ProjectAccessor,
    picker: &'a dyn FolderPicker,
    notifier: &'a dyn Notifier,
}

impl<'a> Importer<'a> {
    pub fn new(
        selection: &'a dyn SelectionSource,
        projects: &'a dyn ProjectAccessor,
        picker: &'a dyn FolderPicker,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            selection,
            projects,
            picker,
            notifier,
        }
    }

    /// Imports the selected SDK into a root beneath `solution_dir`.
    ///
    /// # Errors
    ///
    /// Returns an `Err` for a malformed manifest or a root that cannot be
    /// expressed relative to the solution.
    pub fn run(&self, solution_dir: &Path) -> Result<ImportOutcome> {
        let Some(reference) = reference::as_extension_sdk(self.selection.current_selection()?)
        else {
            debug!("Selection is not an Extension SDK reference; nothing to do");
            return Ok(ImportOutcome::NotApplicable);
        };
        let solution_dir = paths::absolutize(solution_dir)
            .with_context(|| format!("Invalid solution directory {}", solution_dir.display()))?;

        let Some(mut project) = self.projects.open(&reference.containing_project)? else {
            self.notifier
                .error("There was an error enumerating the projects");
            return Ok(ImportOutcome::ProjectNotFound {
                project: reference.containing_project,
            });
        };

        let property = project.property(SDK_ROOT_PROPERTY);
        let overrides = OverrideState::resolve(property.as_ref());

        let Some(manifest) = manifest::read_manifest(&reference.source_path)? else {
            info!(
                "No Extension SDK manifest under {}; nothing to convert",
                reference.source_path.display()
            );
            return Ok(ImportOutcome::NothingToConvert);
        };
        debug!("Manifest: {:?}", manifest);

        let root = match &overrides.solution_root {
            Some(root) => {
                info!("Reusing solution-local SDK root {}", root);
                paths::to_native(root)
            }
            None => match self.picker.pick_folder(FOLDER_PROMPT, &solution_dir)? {
                Some(root) => paths::absolutize(&root)
                    .with_context(|| format!("Invalid folder {}", root.display()))?,
                None => {
                    info!("Folder selection cancelled");
                    return Ok(ImportOutcome::Cancelled);
                }
            },
        };

        let plan = ImportPlan::new(&root, &manifest, &overrides);
        debug!("Import plan: {:?}", plan);

        if plan.is_already_imported() {
            self.notifier.info(&already_imported_message(&manifest));
            return Ok(ImportOutcome::AlreadyImported {
                destination: plan.destination,
            });
        }

        // Computed before anything is written so an unusable root has no side effects.
        let new_value = if plan.needs_patch() {
            Some(override_value(&solution_dir, &root, property.as_ref())?)
        } else {
            None
        };

        let copied = if plan.needs_copy() {
            if let Err(e) = copy::mirror_directory(&reference.source_path, &plan.destination) {
                warn!("Copying to {} failed: {:?}", plan.destination.display(), e);
                self.notifier
                    .error(&format!("There was an error copying the SDK: {:#}", e));
                return Ok(ImportOutcome::CopyFailed {
                    destination: plan.destination,
                });
            }
            true
        } else {
            info!(
                "Destination {} already exists; not copying",
                plan.destination.display()
            );
            false
        };

        let Some(new_value) = new_value else {
            self.notifier.info(
                "The extension has been added to the folder you specified. You may need to refresh \
                 the solution, after which the reference should resolve to the folder you chose.",
            );
            return Ok(ImportOutcome::Imported {
                destination: plan.destination,
                copied,
                project_updated: false,
            });
        };

        project.add_property_group(SDK_ROOT_PROPERTY, &new_value);
        match project.save() {
            Ok(()) => {
                info!("Set {} to '{}'", SDK_ROOT_PROPERTY, new_value);
                self.notifier.info(
                    "The extension has been added to the folder you specified. You may be asked to \
                     reload your project, after which the reference should resolve to the folder you chose.",
                );
                Ok(ImportOutcome::Imported {
                    destination: plan.destination,
                    copied,
                    project_updated: true,
                })
            }
            Err(e) => {
                warn!("Saving {} failed: {:?}", reference.containing_project.display(), e);
                self.notifier.error(&format!(
                    "There was an error saving the project file: {:#}",
                    e
                ));
                Ok(ImportOutcome::SaveFailed {
                    destination: plan.destination,
                    copied,
                })
            }
        }
    }
}

fn already_imported_message(manifest: &SdkManifest) -> String {
    format!(
        "The SDK '{}' Version '{}' has already been imported into the solution. The reference \
         should already resolve to a path inside the solution; if not, refresh the solution.",
        manifest.sdk_name, manifest.sdk_version
    )
}

/// Value for a new `SDKReferenceDirectoryRoot`: the solution-relative root
/// first, followed by whatever the property held before.
pub fn override_value(
    solution_dir: &Path,
    root: &Path,
    existing: Option<&ProjectProperty>,
) -> Result<String> {
    let relative = pathdiff::diff_paths(root, solution_dir).ok_or_else(|| {
        anyhow::Error::new(SdkPortError::RelativeRoot {
            root: root.to_path_buf(),
            solution_dir: solution_dir.to_path_buf(),
        })
    })?;
    let mut relative = relative.to_string_lossy().into_owned();
    if !relative.is_empty() && !relative.starts_with(['/', '\\']) {
        relative.insert(0, MAIN_SEPARATOR);
    }

    let existing = existing
        .map(|p| p.unevaluated_value.trim())
        .unwrap_or_default();
    if existing.is_empty() {
        Ok(format!("{}{}", SOLUTION_DIR_TOKEN, relative))
    } else {
        Ok(format!("{}{};{}", SOLUTION_DIR_TOKEN, relative, existing))
    }
}
