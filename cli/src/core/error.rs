//! # sdkport Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout sdkport. Errors that the
//! user should be able to recognise (a malformed manifest, a project that cannot
//! be found, a prompt that could not be shown) get a dedicated `SdkPortError`
//! variant; everything else travels as an `anyhow::Error` with context attached.
//!
//! ## Architecture
//!
//! - `SdkPortError`: a `thiserror` enum for the specific failure domains
//! - `Result<T>`: a type alias for `anyhow::Result<T>`
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !path.is_dir() {
//!     anyhow::bail!(SdkPortError::FileSystem(format!("Not a directory: {}", path.display())));
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for sdkport.
#[derive(Error, Debug)]
pub enum SdkPortError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Manifest '{}' is malformed: {source}", .path.display())]
    ManifestXml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Manifest '{}' is missing required attribute '{attribute}' on InstallationTarget", .path.display())]
    ManifestAttribute { path: PathBuf, attribute: String },

    #[error("Project file '{}' could not be parsed: {source}", .path.display())]
    ProjectXml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Project file '{}' not found", .0.display())]
    ProjectNotFound(PathBuf),

    #[error("Project file '{}' has an unexpected layout: {reason}", .path.display())]
    ProjectLayout { path: PathBuf, reason: String },

    #[error("Cannot express '{}' relative to the solution directory '{}'", .root.display(), .solution_dir.display())]
    RelativeRoot {
        root: PathBuf,
        solution_dir: PathBuf,
    },

    #[error("Prompt failed: {0}")]
    Prompt(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = SdkPortError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );

        let missing = SdkPortError::ManifestAttribute {
            path: PathBuf::from("sdk/extension.vsixmanifest"),
            attribute: "SdkName".into(),
        };
        assert_eq!(
            missing.to_string(),
            "Manifest 'sdk/extension.vsixmanifest' is missing required attribute 'SdkName' on InstallationTarget"
        );

        let relative = SdkPortError::RelativeRoot {
            root: PathBuf::from("libs"),
            solution_dir: PathBuf::from("/sln"),
        };
        assert!(relative.to_string().contains("relative to the solution directory"));
    }
}
