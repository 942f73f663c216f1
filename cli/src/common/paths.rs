//! # sdkport Path Normalization (`common::paths`)
//!
//! File: cli/src/common/paths.rs
//!
//! ## Overview
//!
//! Paths reach sdkport from three places: the command line, the filesystem, and
//! evaluated MSBuild property values. MSBuild values use `\` regardless of the
//! host, frequently carry a doubled separator (`$(SolutionDir)` already ends in
//! one) and compare case-insensitively. Every comparison in the crate goes
//! through [`normalize_for_compare`] so that duplicate detection, visibility
//! checks and override parsing agree on what "the same folder" means.
//!
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Canonical comparison form of a path string.
///
/// Both `/` and `\` count as separators, repeated separators collapse, `.`
/// components are dropped, trailing separators are trimmed and the result is
/// lowercased. A leading separator is kept so absolute and relative paths stay
/// distinct. Surrounding whitespace (common in multi-line MSBuild values) is
/// ignored.
pub fn normalize_for_compare(path: &str) -> String {
    let trimmed = path.trim();
    let absolute = trimmed.starts_with(['/', '\\']);
    let joined = trimmed
        .split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/");
    let joined = joined.to_lowercase();
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

/// Returns `true` when both strings name the same folder after normalization.
pub fn same_path(a: &str, b: &str) -> bool {
    normalize_for_compare(a) == normalize_for_compare(b)
}

/// Returns `true` when `path` is `dir` itself or lies beneath it.
///
/// The check is component-wise, so `/sln-other` is not inside `/sln`.
pub fn is_within(path: &Path, dir: &Path) -> bool {
    let path = normalize_for_compare(&path.to_string_lossy());
    let dir = normalize_for_compare(&dir.to_string_lossy());
    if dir.is_empty() || dir == "/" {
        return !path.is_empty();
    }
    path == dir || path.starts_with(&format!("{}/", dir))
}

/// Converts an evaluated MSBuild path into a path for the current platform.
pub fn to_native(value: &str) -> PathBuf {
    let value = value.trim();
    if MAIN_SEPARATOR == '/' {
        PathBuf::from(value.replace('\\', "/"))
    } else {
        PathBuf::from(value.replace('/', "\\"))
    }
}

/// Renders a directory the way MSBuild exposes `$(SolutionDir)` and
/// `$(ProjectDir)`: with exactly one trailing separator.
pub fn with_trailing_separator(dir: &Path) -> String {
    let mut text = dir.to_string_lossy().into_owned();
    if !text.ends_with(['/', '\\']) {
        text.push(MAIN_SEPARATOR);
    }
    text
}

/// Makes `path` absolute against the current working directory without
/// touching the filesystem.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(path)
}
