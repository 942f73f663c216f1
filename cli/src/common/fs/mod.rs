//! # sdkport Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the importer and the project model.
//!
//! - **`copy`**: the two-phase directory mirror used to relocate an SDK (`mirror_directory`).
//! - **`io`**: text file I/O with context, directory creation, and the upward search for a solution file.
//!
//! Callers import from the specific submodule, e.g. `crate::common::fs::io::read_file_to_string`.
//!

/// Directory mirroring (`mirror_directory`).
pub mod copy;
/// Basic file I/O (`ensure_dir_exists`, `read_file_to_string`, `read_xml_text`, `write_string_to_file`, `find_in_ancestors`).
pub mod io;
