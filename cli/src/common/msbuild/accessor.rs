//! # MSBuild Project Accessor
//!
//! File: cli/src/common/msbuild/accessor.rs
//!
//! Binds `MsBuildProject` to the importer's `ProjectAccessor`/`ProjectModel`
//! capabilities. A project path that does not name an existing file is "not
//! loaded"; a file that exists but cannot be parsed is an error.
//!
use super::project::{EvaluationSettings, MsBuildProject, ProjectProperty};
use crate::core::error::Result;
use crate::core::host::{ProjectAccessor, ProjectModel};
use std::path::Path;
use tracing::warn;

/// Opens MSBuild project files from disk with fixed evaluation settings.
#[derive(Debug, Clone)]
pub struct MsBuildAccessor {
    settings: EvaluationSettings,
}

impl MsBuildAccessor {
    pub fn new(settings: EvaluationSettings) -> Self {
        Self { settings }
    }

    /// Loads the concrete project type; used by commands that inspect items.
    pub fn load(&self, project_path: &Path) -> Result<Option<MsBuildProject>> {
        if !project_path.is_file() {
            warn!("Project file {} does not exist", project_path.display());
            return Ok(None);
        }
        MsBuildProject::load(project_path, &self.settings).map(Some)
    }
}

impl ProjectAccessor for MsBuildAccessor {
    fn open(&self, project_path: &Path) -> Result<Option<Box<dyn ProjectModel>>> {
        Ok(self
            .load(project_path)?
            .map(|project| Box::new(project) as Box<dyn ProjectModel>))
    }
}

impl ProjectModel for MsBuildProject {
    fn property(&self, name: &str) -> Option<ProjectProperty> {
        MsBuildProject::property(self, name).cloned()
    }

    fn add_property_group(&mut self, name: &str, value: &str) {
        MsBuildProject::add_property_group(self, name, value)
    }

    fn save(&mut self) -> Result<()> {
        MsBuildProject::save(self)
    }
}
