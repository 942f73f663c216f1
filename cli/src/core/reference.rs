//! # Reference Classification
//!
//! File: cli/src/core/reference.rs
//!
//! ## Overview
//!
//! A project can reference assemblies, COM components, other projects and
//! Extension SDKs. Only Extension SDKs can be relocated. This module describes
//! a selected reference and answers two questions about it:
//!
//! - `as_extension_sdk`: is this selection actionable at all?
//! - `is_import_offered`: should the import action be offered for it? It is
//!   hidden when the SDK already lives beneath the solution directory.
//!
use crate::common::paths;
use std::fmt;
use std::path::{Path, PathBuf};

/// The kind of a project reference, derived from its MSBuild item type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceKind {
    Assembly,
    Com,
    Project,
    ExtensionSdk,
    Other(String),
}

impl ReferenceKind {
    pub fn from_item_type(item_type: &str) -> Self {
        match item_type.to_ascii_lowercase().as_str() {
            "reference" => Self::Assembly,
            "comreference" => Self::Com,
            "projectreference" => Self::Project,
            "sdkreference" => Self::ExtensionSdk,
            _ => Self::Other(item_type.to_string()),
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assembly => f.write_str("Assembly"),
            Self::Com => f.write_str("COM"),
            Self::Project => f.write_str("Project"),
            Self::ExtensionSdk => f.write_str("ExtensionSDK"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// The currently selected reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceDescriptor {
    /// Full path of the project file that owns the reference.
    pub containing_project: PathBuf,
    /// Folder the reference currently resolves to.
    pub source_path: PathBuf,
    pub kind: ReferenceKind,
}

/// Returns the selection only if it is an Extension SDK reference.
pub fn as_extension_sdk(selection: Option<ReferenceDescriptor>) -> Option<ReferenceDescriptor> {
    selection.filter(|reference| reference.kind == ReferenceKind::ExtensionSdk)
}

/// Whether the import action applies to `selection`.
///
/// Requires an Extension SDK; when the solution directory is known, the SDK
/// must not already live beneath it.
pub fn is_import_offered(selection: Option<&ReferenceDescriptor>, solution_dir: Option<&Path>) -> bool {
    match selection {
        Some(reference) if reference.kind == ReferenceKind::ExtensionSdk => match solution_dir {
            Some(dir) => !paths::is_within(&reference.source_path, dir),
            None => true,
        },
        _ => false,
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(kind: ReferenceKind, source: &str) -> ReferenceDescriptor {
        ReferenceDescriptor {
            containing_project: PathBuf::from("/sln/App/App.csproj"),
            source_path: PathBuf::from(source),
            kind,
        }
    }

    #[test]
    fn test_kind_from_item_type() {
        assert_eq!(ReferenceKind::from_item_type("SDKReference"), ReferenceKind::ExtensionSdk);
        assert_eq!(ReferenceKind::from_item_type("sdkreference"), ReferenceKind::ExtensionSdk);
        assert_eq!(ReferenceKind::from_item_type("Reference"), ReferenceKind::Assembly);
        assert_eq!(ReferenceKind::from_item_type("COMReference"), ReferenceKind::Com);
        assert_eq!(
            ReferenceKind::from_item_type("Analyzer"),
            ReferenceKind::Other("Analyzer".into())
        );
    }

    #[test]
    fn test_only_extension_sdks_are_actionable() {
        assert!(as_extension_sdk(None).is_none());
        assert!(as_extension_sdk(Some(descriptor(ReferenceKind::Assembly, "/x"))).is_none());
        assert!(as_extension_sdk(Some(descriptor(ReferenceKind::ExtensionSdk, "/x"))).is_some());
    }

    #[test]
    fn test_import_hidden_for_sdk_already_under_solution() {
        let local = descriptor(ReferenceKind::ExtensionSdk, "/SLN/libs/Windows/v8.1/ExtensionSDKs/Foo/1.0");
        let global = descriptor(ReferenceKind::ExtensionSdk, "/opt/sdks/Windows/v8.1/ExtensionSDKs/Foo/1.0");
        let sln = Path::new("/sln");

        assert!(!is_import_offered(Some(&local), Some(sln)));
        assert!(is_import_offered(Some(&global), Some(sln)));
        assert!(is_import_offered(Some(&local), None));
    }

    #[test]
    fn test_import_hidden_for_other_kinds_and_no_selection() {
        let assembly = descriptor(ReferenceKind::Assembly, "/opt/lib.dll");
        assert!(!is_import_offered(Some(&assembly), None));
        assert!(!is_import_offered(None, Some(Path::new("/sln"))));
    }
}
