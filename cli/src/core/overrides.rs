//! # SDK Root Override Resolution
//!
//! File: cli/src/core/overrides.rs
//!
//! ## Overview
//!
//! MSBuild resolves `<SDKReference>` items by searching the roots listed in
//! `SDKReferenceDirectoryRoot`. A project that already carries its own
//! (non-imported) declaration of that property may already point at a
//! solution-local root, written as `$(SolutionDir)...`. When it does, the
//! importer reuses that root instead of asking the user for one.
//!
//! The raw and evaluated values are split on `;` and paired by position: the
//! first raw entry mentioning `$(SolutionDir)` selects the evaluated entry at
//! the same index. A declaration whose entries never mention the token still
//! counts as a local override, it just offers no root to reuse.
//!
use crate::common::msbuild::{ProjectProperty, SOLUTION_DIR_TOKEN};
use crate::common::paths;
use std::path::Path;
use tracing::{debug, warn};

/// What the project's `SDKReferenceDirectoryRoot` says about solution-local roots.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverrideState {
    /// The project declares the property itself.
    pub has_local_override: bool,
    /// Evaluated root paired with the first raw entry containing `$(SolutionDir)`.
    pub solution_root: Option<String>,
    /// Every evaluated entry of the local declaration.
    pub evaluated_roots: Vec<String>,
}

impl OverrideState {
    /// Inspects the property as returned by the project model. Imported values
    /// are global defaults and are ignored.
    pub fn resolve(property: Option<&ProjectProperty>) -> Self {
        let Some(property) = property.filter(|p| !p.is_imported) else {
            debug!("No locally declared SDK root override");
            return Self::default();
        };

        let raw_entries = split_roots(&property.unevaluated_value);
        let evaluated_entries = split_roots(&property.evaluated_value);
        let token = SOLUTION_DIR_TOKEN.to_lowercase();

        let solution_root = raw_entries
            .iter()
            .position(|entry| entry.to_lowercase().contains(&token))
            .and_then(|index| match evaluated_entries.get(index) {
                Some(evaluated) if !evaluated.trim().is_empty() => {
                    Some(evaluated.trim().to_string())
                }
                _ => {
                    warn!(
                        "Override entry {} ('{}') has no evaluated counterpart in '{}'",
                        index, raw_entries[index], property.evaluated_value
                    );
                    None
                }
            });

        debug!(
            "Local SDK root override '{}' resolves solution root {:?}",
            property.unevaluated_value, solution_root
        );

        Self {
            has_local_override: true,
            solution_root,
            evaluated_roots: evaluated_entries
                .into_iter()
                .map(|entry| entry.trim().to_string())
                .filter(|entry| !entry.is_empty())
                .collect(),
        }
    }

    /// Whether the local override already lists `root`.
    pub fn contains_root(&self, root: &Path) -> bool {
        let root = root.to_string_lossy();
        self.has_local_override
            && self
                .evaluated_roots
                .iter()
                .any(|entry| paths::same_path(entry, &root))
    }
}

/// Splits a root list on `;`, keeping empty entries so positions line up.
pub fn split_roots(value: &str) -> Vec<&str> {
    value.split(';').collect()
}
