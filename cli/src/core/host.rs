//! # Host Capabilities
//!
//! File: cli/src/core/host.rs
//!
//! ## Overview
//!
//! The importer never reaches for global services. Everything it needs from
//! its surroundings is passed in through the traits below, so the decision logic
//! runs unchanged under the command-line adapters in `common` and under the
//! in-memory fakes used by the tests.
//!
//! | Trait             | Provides                                              |
//! |-------------------|-------------------------------------------------------|
//! | `SelectionSource` | the reference the user is acting on                   |
//! | `ProjectAccessor` | loading the project that owns that reference          |
//! | `ProjectModel`    | reading/adding build properties and saving            |
//! | `FolderPicker`    | the one interactive step: choosing an SDK root        |
//! | `Notifier`        | informational and critical messages                   |
//!
use crate::common::msbuild::ProjectProperty;
use crate::core::error::Result;
use crate::core::reference::ReferenceDescriptor;
use std::path::{Path, PathBuf};

/// Title shown with every notification.
pub const NOTIFICATION_TITLE: &str = "Extension SDK Converter";

/// Yields the currently selected reference, if any.
pub trait SelectionSource {
    fn current_selection(&self) -> Result<Option<ReferenceDescriptor>>;
}

/// A loaded project whose build properties can be read and extended.
pub trait ProjectModel {
    /// Property value as evaluated for the project, local or imported.
    fn property(&self, name: &str) -> Option<ProjectProperty>;

    /// Appends a new property group containing one property.
    fn add_property_group(&mut self, name: &str, value: &str);

    /// Persists the project file.
    fn save(&mut self) -> Result<()>;
}

/// Locates loaded projects by path.
pub trait ProjectAccessor {
    /// `Ok(None)` when no project is known at `project_path`.
    fn open(&self, project_path: &Path) -> Result<Option<Box<dyn ProjectModel>>>;
}

/// Lets the user pick (or create) a folder.
pub trait FolderPicker {
    /// `Ok(None)` means the user cancelled.
    fn pick_folder(&self, description: &str, default: &Path) -> Result<Option<PathBuf>>;
}

/// Modal, single-acknowledgement messages.
pub trait Notifier {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}
