//! # sdkport Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates sdkport's configuration. Nothing in it
//! is required: with no configuration files present the built-in defaults mirror
//! what the MSBuild common targets and the IDE would supply.
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.sdkport.toml` next to the project file or in an ancestor
//!    directory (the search stops at a directory containing `.git`)
//! 2. User-specific `<config dir>/sdkport/config.toml`
//! 3. Default values defined in the code
//!
//! ## Format
//!
//! ```toml
//! [msbuild]
//! # Value of SDKReferenceDirectoryRoot when the project does not declare it.
//! default_sdk_roots = '$(LocalAppData)\Microsoft SDKs;$(MSBuildProgramFiles32)\Microsoft SDKs'
//!
//! # Extra global properties visible to evaluation.
//! [msbuild.properties]
//! LocalAppData = "~/.local/share"
//!
//! [import]
//! # Pre-filled answer for the destination folder prompt. Relative paths are
//! # resolved against the solution directory.
//! default_root = "packages/sdks"
//! ```
//!
use crate::common::msbuild::{EvaluationSettings, DEFAULT_SDK_ROOTS, SDK_ROOT_PROPERTY};
use crate::core::error::{Result, SdkPortError};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".sdkport.toml";

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub msbuild: MsBuildConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

/// Settings that shape how project files are evaluated.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MsBuildConfig {
    /// Fallback for `SDKReferenceDirectoryRoot` when the project leaves it unset.
    #[serde(default = "default_sdk_roots")]
    pub default_sdk_roots: String,
    /// Additional global properties for `$(Name)` expansion.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl Default for MsBuildConfig {
    fn default() -> Self {
        Self {
            default_sdk_roots: default_sdk_roots(),
            properties: BTreeMap::new(),
        }
    }
}

/// Settings for the `import` command.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ImportConfig {
    /// Default answer for the destination folder prompt (can use ~).
    pub default_root: Option<String>,
}

fn default_sdk_roots() -> String {
    DEFAULT_SDK_ROOTS.to_string()
}

impl Config {
    /// Evaluation settings for projects in `solution_dir`.
    pub fn evaluation_settings(
        &self,
        solution_dir: &Path,
        solution_file: Option<&Path>,
    ) -> EvaluationSettings {
        let imported_defaults = BTreeMap::from([(
            SDK_ROOT_PROPERTY.to_string(),
            self.msbuild.default_sdk_roots.clone(),
        )]);
        EvaluationSettings {
            solution_dir: Some(solution_dir.to_path_buf()),
            solution_file: solution_file.map(Path::to_path_buf),
            global_properties: self.msbuild.properties.clone(),
            imported_defaults,
        }
    }

    /// The configured default import root, resolved against `solution_dir`.
    pub fn default_import_root(&self, solution_dir: &Path) -> Option<PathBuf> {
        self.import.default_root.as_ref().map(|root| {
            let root = PathBuf::from(root);
            if root.is_absolute() {
                root
            } else {
                solution_dir.join(root)
            }
        })
    }
}

/// Loads the merged configuration, looking for a project file from `start_dir` upwards.
pub fn load_config(start_dir: &Path) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config(start_dir)?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "sdkport", "sdkport") else {
        warn!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_project_config(start_dir: &Path) -> Result<Option<Config>> {
    match find_project_config_path(start_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!(
                "No project configuration file ({}) found above {}",
                PROJECT_CONFIG_FILENAME,
                start_dir.display()
            );
            Ok(None)
        }
    }
}

fn find_project_config_path(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let project_config = dir.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if dir.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                dir.display()
            );
            return None;
        }
    }
    None
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project settings win field by field; property maps are combined.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project) = project else {
        return user;
    };
    let default_sdk_roots = if project.msbuild.default_sdk_roots != default_sdk_roots() {
        project.msbuild.default_sdk_roots
    } else {
        user.msbuild.default_sdk_roots
    };
    let mut properties = user.msbuild.properties;
    properties.extend(project.msbuild.properties);

    Config {
        msbuild: MsBuildConfig {
            default_sdk_roots,
            properties,
        },
        import: ImportConfig {
            default_root: project.import.default_root.or(user.import.default_root),
        },
    }
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    if let Some(root) = config.import.default_root.as_mut() {
        *root = shellexpand::tilde(root.as_str()).into_owned();
        debug!("Expanded default import root: {}", root);
    }
    for value in config.msbuild.properties.values_mut() {
        *value = shellexpand::tilde(value.as_str()).into_owned();
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(name) = config
        .msbuild
        .properties
        .keys()
        .find(|name| name.trim().is_empty() || name.contains(['$', '(', ')', ';']))
    {
        return Err(anyhow!(SdkPortError::Config(format!(
            "Invalid MSBuild property name '{}' in [msbuild.properties].",
            name
        ))));
    }
    if let Some(root) = &config.import.default_root {
        let root = PathBuf::from(root);
        if root.exists() && !root.is_dir() {
            return Err(anyhow!(SdkPortError::Config(format!(
                "Configured import root '{}' exists but is not a directory.",
                root.display()
            ))));
        }
    }
    debug!("Configuration validation successful.");
    Ok(())
}
