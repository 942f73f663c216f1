//! # Command-Line Reference Selection (`common::selection`)
//!
//! File: cli/src/common/selection.rs
//!
//! ## Overview
//!
//! On the command line a "selection" is a project file plus the `Include` value
//! of one of its reference items. `ProjectItemSelection` turns that pair into a
//! `ReferenceDescriptor`:
//!
//! - The item's element name decides the kind (`SDKReference` is an
//!   Extension SDK).
//! - The SDK's folder is taken from `--sdk-path` when given. Otherwise it is
//!   looked up under every evaluated `SDKReferenceDirectoryRoot` entry as
//!   `<root>/<platform>/<platform version>/ExtensionSDKs/<name>/<version>`.
//!
//! An `Include` such as `SQLite.WinRT81, Version=3.8.7.4` is matched either in
//! full or by its name part, case-insensitively. When it carries no version,
//! the last version folder in name order is used.
//!
use crate::common::msbuild::{MsBuildAccessor, MsBuildProject, ProjectItem, SDK_ROOT_PROPERTY};
use crate::common::paths;
use crate::core::error::{Result, SdkPortError};
use crate::core::host::SelectionSource;
use crate::core::planner::EXTENSION_SDKS_DIR;
use crate::core::reference::{ReferenceDescriptor, ReferenceKind};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Depth of `<name>/<version>` below an SDK root.
const SDK_VERSION_DEPTH: usize = 5;

/// Name and optional version parsed from an `SDKReference` include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkIdentity {
    pub name: String,
    pub version: Option<String>,
}

impl SdkIdentity {
    /// Parses `Name, Version=1.0` (extra comma-separated metadata is ignored).
    pub fn parse(include: &str) -> Self {
        let mut parts = include.split(',').map(str::trim);
        let name = parts.next().unwrap_or_default().to_string();
        let version = parts.find_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("Version")
                .then(|| value.trim().to_string())
        });
        Self { name, version }
    }
}

/// A reference picked by project path and item include.
pub struct ProjectItemSelection<'a> {
    accessor: &'a MsBuildAccessor,
    project_path: PathBuf,
    reference: String,
    sdk_path: Option<PathBuf>,
}

impl<'a> ProjectItemSelection<'a> {
    pub fn new(
        accessor: &'a MsBuildAccessor,
        project_path: &Path,
        reference: &str,
        sdk_path: Option<PathBuf>,
    ) -> Self {
        Self {
            accessor,
            project_path: project_path.to_path_buf(),
            reference: reference.to_string(),
            sdk_path,
        }
    }
}

impl SelectionSource for ProjectItemSelection<'_> {
    fn current_selection(&self) -> Result<Option<ReferenceDescriptor>> {
        let Some(project) = self.accessor.load(&self.project_path)? else {
            // An explicit SDK folder is enough to act on; the importer reports the missing project.
            return match &self.sdk_path {
                Some(sdk_path) => Ok(Some(ReferenceDescriptor {
                    containing_project: self.project_path.clone(),
                    source_path: sdk_path.clone(),
                    kind: ReferenceKind::ExtensionSdk,
                })),
                None => Err(SdkPortError::ProjectNotFound(self.project_path.clone()).into()),
            };
        };

        let Some(item) = find_item(project.items(), &self.reference) else {
            warn!(
                "No reference '{}' in {}",
                self.reference,
                self.project_path.display()
            );
            return Ok(None);
        };
        let kind = ReferenceKind::from_item_type(&item.item_type);
        debug!("Selected {} reference '{}'", kind, item.include);

        let source_path = match (&self.sdk_path, &kind) {
            (Some(path), _) => Some(path.clone()),
            (None, ReferenceKind::ExtensionSdk) => locate_sdk(&project, &item.include),
            (None, _) => Some(PathBuf::from(&item.include)),
        };
        let Some(source_path) = source_path else {
            warn!(
                "Could not locate Extension SDK '{}' under any SDK root of {}",
                item.include,
                self.project_path.display()
            );
            return Ok(None);
        };

        Ok(Some(ReferenceDescriptor {
            containing_project: self.project_path.clone(),
            source_path,
            kind,
        }))
    }
}

/// Finds the item whose include matches `reference` in full or by name.
pub fn find_item<'p>(items: &'p [ProjectItem], reference: &str) -> Option<&'p ProjectItem> {
    let wanted = reference.trim();
    items
        .iter()
        .find(|item| item.include.trim().eq_ignore_ascii_case(wanted))
        .or_else(|| {
            let wanted_name = SdkIdentity::parse(wanted).name;
            items
                .iter()
                .find(|item| SdkIdentity::parse(&item.include).name.eq_ignore_ascii_case(&wanted_name))
        })
}

/// Searches the project's SDK roots for the folder of the SDK named by `include`.
pub fn locate_sdk(project: &MsBuildProject, include: &str) -> Option<PathBuf> {
    let identity = SdkIdentity::parse(include);
    let roots = project
        .property(SDK_ROOT_PROPERTY)
        .map(|p| p.evaluated_value.clone())
        .unwrap_or_default();

    roots
        .split(';')
        .filter(|entry| !entry.trim().is_empty())
        .map(paths::to_native)
        .filter(|root| root.is_dir())
        .find_map(|root| locate_under_root(&root, &identity))
}

/// `<root>/*/*/ExtensionSDKs/<name>/<version>`; walks only the matching branches.
/// Without a requested version the highest version folder wins.
fn locate_under_root(root: &Path, identity: &SdkIdentity) -> Option<PathBuf> {
    debug!("Looking for {:?} under {}", identity, root.display());
    WalkDir::new(root)
        .max_depth(SDK_VERSION_DEPTH)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            match entry.depth() {
                3 => name.eq_ignore_ascii_case(EXTENSION_SDKS_DIR),
                4 => name.eq_ignore_ascii_case(&identity.name),
                5 => identity
                    .version
                    .as_deref()
                    .map_or(true, |version| name.eq_ignore_ascii_case(version)),
                _ => true,
            }
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.depth() == SDK_VERSION_DEPTH && entry.file_type().is_dir())
        .max_by(|a, b| {
            compare_versions(&a.file_name().to_string_lossy(), &b.file_name().to_string_lossy())
        })
        .map(|entry| entry.into_path())
}

/// Orders dotted versions segment by segment, numerically where both segments
/// are numbers. A leading `v` is ignored.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let segments = |v: &str| -> Vec<String> {
        v.trim_start_matches(['v', 'V'])
            .split('.')
            .map(str::to_string)
            .collect()
    };
    let (a, b) = (segments(a), segments(b));
    for pair in a.iter().zip(b.iter()) {
        let ordering = match (pair.0.parse::<u64>(), pair.1.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => pair.0.to_lowercase().cmp(&pair.1.to_lowercase()),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::msbuild::EvaluationSettings;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::tempdir;

    fn project_with_root(dir: &Path, root: &Path) -> PathBuf {
        let path = dir.join("App.csproj");
        let text = format!(
            r#"<Project>
  <PropertyGroup>
    <SDKReferenceDirectoryRoot>{};$(Missing)</SDKReferenceDirectoryRoot>
  </PropertyGroup>
  <ItemGroup>
    <SDKReference Include="Foo, Version=2.0" />
    <Reference Include="System.Xml" />
  </ItemGroup>
</Project>"#,
            root.display()
        );
        fs::write(&path, text).unwrap();
        path
    }

    fn accessor() -> MsBuildAccessor {
        MsBuildAccessor::new(EvaluationSettings {
            imported_defaults: BTreeMap::new(),
            ..Default::default()
        })
    }

    #[test]
    fn test_sdk_identity_parse() {
        assert_eq!(
            SdkIdentity::parse("SQLite.WinRT81, Version=3.8.7.4"),
            SdkIdentity {
                name: "SQLite.WinRT81".into(),
                version: Some("3.8.7.4".into())
            }
        );
        assert_eq!(SdkIdentity::parse("Foo").version, None);
    }

    #[test]
    fn test_find_item_by_full_include_or_name() {
        let items = vec![
            ProjectItem {
                item_type: "Reference".into(),
                include: "System.Xml".into(),
            },
            ProjectItem {
                item_type: "SDKReference".into(),
                include: "Foo, Version=2.0".into(),
            },
        ];
        assert_eq!(find_item(&items, "foo, version=2.0").unwrap().item_type, "SDKReference");
        assert_eq!(find_item(&items, "FOO").unwrap().item_type, "SDKReference");
        assert!(find_item(&items, "Bar").is_none());
    }

    #[test]
    fn test_selection_locates_sdk_under_declared_root() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("sdks");
        let sdk = root.join("Windows/v8.1/ExtensionSDKs/Foo/2.0");
        fs::create_dir_all(&sdk)?;
        fs::create_dir_all(root.join("Windows/v8.1/ExtensionSDKs/Foo/1.0"))?;
        fs::create_dir_all(root.join("Windows/v8.1/ExtensionSDKs/Bar/2.0"))?;
        let project = project_with_root(dir.path(), &root);
        let accessor = accessor();

        let selection = ProjectItemSelection::new(&accessor, &project, "Foo", None);
        let reference = selection.current_selection()?.unwrap();

        assert_eq!(reference.kind, ReferenceKind::ExtensionSdk);
        assert_eq!(reference.source_path, sdk);
        assert_eq!(reference.containing_project, project);
        Ok(())
    }

    #[test]
    fn test_unversioned_include_takes_highest_version() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path().join("sdks");
        fs::create_dir_all(root.join("Windows/v8.1/ExtensionSDKs/Foo/1.0"))?;
        fs::create_dir_all(root.join("Windows/v8.1/ExtensionSDKs/Foo/9.0"))?;
        fs::create_dir_all(root.join("Windows/v8.1/ExtensionSDKs/Foo/10.0"))?;
        let project_path = project_with_root(dir.path(), &root);
        let project = accessor().load(&project_path)?.unwrap();

        assert_eq!(
            locate_sdk(&project, "Foo"),
            Some(root.join("Windows/v8.1/ExtensionSDKs/Foo/10.0"))
        );
        assert_eq!(locate_sdk(&project, "Foo, Version=9.9"), None);
        Ok(())
    }

    #[test]
    fn test_compare_versions_is_numeric() {
        assert_eq!(compare_versions("9.0", "10.0"), Ordering::Less);
        assert_eq!(compare_versions("3.8.7.4", "3.8.7"), Ordering::Greater);
        assert_eq!(compare_versions("v8.1", "8.1"), Ordering::Equal);
        assert_eq!(compare_versions("1.0-beta", "1.0-alpha"), Ordering::Greater);
    }

    #[test]
    fn test_unlocatable_sdk_yields_no_selection() -> Result<()> {
        let dir = tempdir()?;
        let project = project_with_root(dir.path(), &dir.path().join("nowhere"));
        let accessor = accessor();
        let selection = ProjectItemSelection::new(&accessor, &project, "Foo", None);
        assert!(selection.current_selection()?.is_none());
        Ok(())
    }

    #[test]
    fn test_assembly_reference_is_classified() -> Result<()> {
        let dir = tempdir()?;
        let project = project_with_root(dir.path(), dir.path());
        let accessor = accessor();
        let selection = ProjectItemSelection::new(&accessor, &project, "System.Xml", None);
        let reference = selection.current_selection()?.unwrap();
        assert_eq!(reference.kind, ReferenceKind::Assembly);
        Ok(())
    }

    #[test]
    fn test_missing_project_without_sdk_path_is_error() {
        let dir = tempdir().unwrap();
        let accessor = accessor();
        let selection =
            ProjectItemSelection::new(&accessor, &dir.path().join("Nope.csproj"), "Foo", None);
        let err = selection.current_selection().unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_missing_project_with_sdk_path_still_selects() -> Result<()> {
        let dir = tempdir()?;
        let accessor = accessor();
        let selection = ProjectItemSelection::new(
            &accessor,
            &dir.path().join("Nope.csproj"),
            "Foo",
            Some(dir.path().join("sdk")),
        );
        let reference = selection.current_selection()?.unwrap();
        assert_eq!(reference.kind, ReferenceKind::ExtensionSdk);
        Ok(())
    }
}
