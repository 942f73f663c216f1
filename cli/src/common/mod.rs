//! # sdkport Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities and the command-line implementations of the importer's
//! host capabilities, kept apart from command-specific logic (`commands::`) and
//! the import workflow (`core::`).
//!
//! - **`fs`**: file I/O helpers and the two-phase directory mirror.
//! - **`msbuild`**: reading, evaluating and patching MSBuild project files.
//! - **`paths`**: path normalization for comparisons.
//! - **`selection`**: picking a reference by project path and include.
//! - **`ui`**: the folder prompt and console notifications.
//!

/// Filesystem operations (I/O, directory mirroring).
pub mod fs;
/// MSBuild project model and evaluation.
pub mod msbuild;
/// Path normalization and containment checks.
pub mod paths;
/// Command-line reference selection.
pub mod selection;
/// Terminal prompt and notifications.
pub mod ui;
