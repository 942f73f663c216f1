//! # sdkport Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the sdkport CLI and the
//! argument handling they share.
//!
//! ## Commands
//!
//! - `import`: relocate an Extension SDK into the solution and patch the project
//! - `status`: report what `import` would do, without side effects
//! - `list`: list the project's Extension SDK references
//!
//! ## Shared Arguments
//!
//! Every command works on one project file (`--project`) inside a solution
//! (`--solution`). `Workspace::resolve` turns those into absolute paths, finds
//! the solution directory and loads the configuration that applies to the
//! project.
//!
use crate::common::fs::io;
use crate::common::msbuild::MsBuildAccessor;
use crate::common::paths;
use crate::core::config::{self, Config};
use crate::core::error::{Result, SdkPortError};
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Handler and arguments for `sdkport import`.
pub mod import;
/// Handler and arguments for `sdkport list`.
pub mod list;
/// Handler and arguments for `sdkport status`.
pub mod status;

/// Arguments that locate the project and its solution.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Path to the project file (e.g. `App/App.csproj`).
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// The solution file or directory. Defaults to the nearest ancestor of the
    /// project holding a `.sln` file.
    #[arg(short, long, value_name = "PATH")]
    pub solution: Option<PathBuf>,
}

/// Arguments that identify one reference within the project.
#[derive(Args, Debug, Clone)]
pub struct ReferenceArgs {
    /// The reference's `Include` value, or just its name (e.g. `SQLite.WinRT81`).
    #[arg(short, long, value_name = "INCLUDE")]
    pub reference: String,

    /// Folder of the installed SDK. Located through the project's SDK roots when omitted.
    #[arg(long, value_name = "DIR")]
    pub sdk_path: Option<PathBuf>,
}

/// Project, solution and configuration resolved for one invocation.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub project: PathBuf,
    pub solution_dir: PathBuf,
    pub solution_file: Option<PathBuf>,
    pub config: Config,
}

impl Workspace {
    pub fn resolve(args: &ProjectArgs) -> Result<Self> {
        let project = paths::absolutize(&args.project)
            .with_context(|| format!("Invalid project path {}", args.project.display()))?;
        let project_dir = project
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| SdkPortError::FileSystem(format!("{} has no parent directory", project.display())))?;

        let solution = match &args.solution {
            Some(path) => Some(
                paths::absolutize(path)
                    .with_context(|| format!("Invalid solution path {}", path.display()))?,
            ),
            None => None,
        };
        let (solution_dir, solution_file) = resolve_solution(&project_dir, solution.as_deref())?;
        debug!(
            "Project {}, solution directory {}",
            project.display(),
            solution_dir.display()
        );

        let config = config::load_config(&project_dir).context("Failed to load sdkport configuration")?;
        Ok(Self {
            project,
            solution_dir,
            solution_file,
            config,
        })
    }

    /// A project accessor evaluating with this workspace's solution and configuration.
    pub fn accessor(&self) -> MsBuildAccessor {
        MsBuildAccessor::new(
            self.config
                .evaluation_settings(&self.solution_dir, self.solution_file.as_deref()),
        )
    }
}

/// Returns the solution directory and, when known, the `.sln` file.
pub fn resolve_solution(
    project_dir: &Path,
    solution: Option<&Path>,
) -> Result<(PathBuf, Option<PathBuf>)> {
    match solution {
        Some(path) if path.is_file() => {
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            Ok((dir, Some(path.to_path_buf())))
        }
        Some(path) if path.is_dir() => {
            let file = io::find_in_ancestors(path, "sln")?.filter(|file| file.parent() == Some(path));
            Ok((path.to_path_buf(), file))
        }
        Some(path) => Err(SdkPortError::FileSystem(format!(
            "Solution path {} does not exist",
            path.display()
        ))
        .into()),
        None => match io::find_in_ancestors(project_dir, "sln")? {
            Some(file) => {
                let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
                Ok((dir, Some(file)))
            }
            None => {
                warn!(
                    "No solution file found above {}; using the project directory as the solution directory",
                    project_dir.display()
                );
                Ok((project_dir.to_path_buf(), None))
            }
        },
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_solution_found_in_ancestor() -> Result<()> {
        let dir = tempdir()?;
        let project_dir = dir.path().join("src/App");
        fs::create_dir_all(&project_dir)?;
        fs::write(dir.path().join("App.sln"), "")?;

        let (solution_dir, solution_file) = resolve_solution(&project_dir, None)?;
        assert_eq!(solution_dir, dir.path());
        assert_eq!(solution_file, Some(dir.path().join("App.sln")));
        Ok(())
    }

    #[test]
    fn test_explicit_solution_file_and_directory() -> Result<()> {
        let dir = tempdir()?;
        let sln = dir.path().join("Big.sln");
        fs::write(&sln, "")?;

        let (solution_dir, solution_file) = resolve_solution(dir.path(), Some(&sln))?;
        assert_eq!(solution_dir, dir.path());
        assert_eq!(solution_file, Some(sln.clone()));

        let (solution_dir, solution_file) = resolve_solution(Path::new("/elsewhere"), Some(dir.path()))?;
        assert_eq!(solution_dir, dir.path());
        assert_eq!(solution_file, Some(sln));
        Ok(())
    }

    #[test]
    fn test_missing_solution_path_is_error() {
        let dir = tempdir().unwrap();
        let result = resolve_solution(dir.path(), Some(&dir.path().join("gone.sln")));
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }
}
