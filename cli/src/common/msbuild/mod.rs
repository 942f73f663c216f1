//! # MSBuild Project Files (`common::msbuild`)
//!
//! File: cli/src/common/msbuild/mod.rs
//!
//! ## Overview
//!
//! sdkport only needs a handful of things from a project file: the evaluated
//! and raw value of one property, the list of reference items, and the ability
//! to append a property group without disturbing the rest of the file. This
//! module provides exactly that on top of `roxmltree`.
//!
//! - **`evaluate`**: `$(Name)` expansion with MSBuild's precedence rules.
//! - **`accessor`**: exposes projects on disk to the importer.
//! - **`project`**: loading, property/item inspection and saving with appended
//!   property groups.
//!

/// Disk-backed `ProjectAccessor` (`MsBuildAccessor`).
pub mod accessor;
/// `$(Name)` expansion (`PropertyScope`).
pub mod evaluate;
/// The project model (`MsBuildProject`, `ProjectProperty`, `ProjectItem`).
pub mod project;

pub use accessor::MsBuildAccessor;
pub use project::{EvaluationSettings, MsBuildProject, ProjectItem, ProjectProperty};

/// Property that lists the roots MSBuild searches for Extension SDK references.
pub const SDK_ROOT_PROPERTY: &str = "SDKReferenceDirectoryRoot";

/// Placeholder token that MSBuild expands to the solution directory.
pub const SOLUTION_DIR_TOKEN: &str = "$(SolutionDir)";

/// The global value of `SDKReferenceDirectoryRoot` supplied by the common targets.
pub const DEFAULT_SDK_ROOTS: &str =
    r"$(LocalAppData)\Microsoft SDKs;$(MSBuildProgramFiles32)\Microsoft SDKs";
