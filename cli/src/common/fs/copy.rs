//! # sdkport Directory Mirror
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Replicates an installed Extension SDK folder into its solution-local
//! destination. The copy runs in two phases: first every directory of the source
//! tree is created beneath the destination, then every file is copied. Because
//! the whole tree exists before the first file is written, no file copy can fail
//! for want of a parent directory, however deeply it is nested.
//!
//! The mirror never merges into an existing destination. An existing folder is
//! assumed to be a complete earlier copy and callers skip the mirror entirely;
//! if the destination exists anyway, the mirror refuses to run.
//!
//! ## Architecture
//!
//! `fs_extra::dir::get_dir_content` enumerates the source tree (all
//! directories, then all files), and `fs_extra::file::copy` copies each file
//! without overwriting. The first failure aborts the mirror and is returned with
//! context; files already copied are left in place.
//!
use crate::core::error::{Result, SdkPortError};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a completed mirror produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MirrorReport {
    pub directories: usize,
    pub files: usize,
    pub bytes: u64,
}

/// Copies the tree rooted at `source` to the not-yet-existing `destination`.
///
/// # Errors
///
/// Returns an `Err` if:
/// - `source` is not a directory, or `destination` already exists.
/// - Any directory cannot be created or any file cannot be copied.
pub fn mirror_directory(source: &Path, destination: &Path) -> Result<MirrorReport> {
    if !source.is_dir() {
        anyhow::bail!(SdkPortError::FileSystem(format!(
            "Mirror source is not a directory: {}",
            source.display()
        )));
    }
    if destination.exists() {
        anyhow::bail!(SdkPortError::FileSystem(format!(
            "Mirror destination already exists: {}",
            destination.display()
        )));
    }
    info!(
        "Mirroring {} to {}",
        source.display(),
        destination.display()
    );

    let content = fs_extra::dir::get_dir_content(source).map_err(|e| {
        anyhow::anyhow!(e).context(format!("Failed to list contents of {}", source.display()))
    })?;

    let mut report = MirrorReport::default();

    // --- Phase 1: directory tree ---
    fs::create_dir_all(destination)
        .with_context(|| format!("Failed to create directory {}", destination.display()))?;
    for dir in &content.directories {
        let target = rebase(source, destination, Path::new(dir))?;
        fs::create_dir_all(&target)
            .with_context(|| format!("Failed to create directory {}", target.display()))?;
        report.directories += 1;
        debug!("Created directory {}", target.display());
    }

    // --- Phase 2: files ---
    let options = fs_extra::file::CopyOptions::new();
    for file in &content.files {
        let file = Path::new(file);
        let target = rebase(source, destination, file)?;
        let copied = fs_extra::file::copy(file, &target, &options).map_err(|e| {
            anyhow::anyhow!(e).context(format!(
                "Failed to copy {} to {}",
                file.display(),
                target.display()
            ))
        })?;
        report.files += 1;
        report.bytes += copied;
        debug!("Copied {} ({} bytes)", target.display(), copied);
    }

    info!(
        "Mirrored {} directories and {} files ({} bytes) into {}",
        report.directories,
        report.files,
        report.bytes,
        destination.display()
    );
    Ok(report)
}

/// Maps a path under `source` to the corresponding path under `destination`.
fn rebase(source: &Path, destination: &Path, path: &Path) -> Result<PathBuf> {
    let relative = path.strip_prefix(source).with_context(|| {
        format!(
            "{} is not inside {}",
            path.display(),
            source.display()
        )
    })?;
    Ok(destination.join(relative))
}
