//! # Destination Planning
//!
//! File: cli/src/core/planner.rs
//!
//! ## Overview
//!
//! Given the SDK root chosen for the solution and the SDK's manifest, this
//! module computes where the SDK must live and decides which of the two side
//! effects (copying files, patching the project) are still required.
//!
//! The destination is a pure function of the root and the manifest identity.
//! An SDK counts as *already imported* only when both halves of an earlier run
//! are present: the destination folder exists **and** the project's local
//! override lists the root. Each half on its own is reconciled independently.
//!
use crate::core::manifest::SdkManifest;
use crate::core::overrides::OverrideState;
use std::path::{Path, PathBuf};

/// Folder that groups Extension SDKs under a platform version.
pub const EXTENSION_SDKS_DIR: &str = "ExtensionSDKs";

/// `<root>/<platform>/<platform version>/ExtensionSDKs/<name>/<version>`.
pub fn destination_for(root: &Path, manifest: &SdkManifest) -> PathBuf {
    root.join(&manifest.target_platform_identifier)
        .join(&manifest.target_platform_version)
        .join(EXTENSION_SDKS_DIR)
        .join(&manifest.sdk_name)
        .join(&manifest.sdk_version)
}

/// The work an import still has to do for one SDK and root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportPlan {
    pub root: PathBuf,
    pub destination: PathBuf,
    pub destination_exists: bool,
    pub root_registered: bool,
}

impl ImportPlan {
    pub fn new(root: &Path, manifest: &SdkManifest, overrides: &OverrideState) -> Self {
        let destination = destination_for(root, manifest);
        Self {
            root: root.to_path_buf(),
            destination_exists: destination.is_dir(),
            destination,
            root_registered: overrides.contains_root(root),
        }
    }

    pub fn is_already_imported(&self) -> bool {
        self.destination_exists && self.root_registered
    }

    pub fn needs_copy(&self) -> bool {
        !self.destination_exists
    }

    pub fn needs_patch(&self) -> bool {
        !self.root_registered
    }
}
