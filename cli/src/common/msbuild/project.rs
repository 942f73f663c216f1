//! # MSBuild Project Model
//!
//! File: cli/src/common/msbuild/project.rs
//!
//! ## Overview
//!
//! `MsBuildProject` is a read-mostly view of an MSBuild project file. It is
//! parsed with `roxmltree`, which keeps byte ranges for every node; those ranges
//! let `save` splice new property groups in front of the closing `</Project>`
//! tag while leaving every other byte of the file as it was.
//!
//! ## Evaluation rules
//!
//! - Unconditioned `PropertyGroup` children are evaluated in document order.
//!   Groups or properties carrying a `Condition` attribute are skipped.
//! - `Import` elements are not followed. Instead, `EvaluationSettings` carries
//!   *imported defaults*: values that apply only when the project itself does
//!   not declare the property (this is how the common targets define
//!   `SDKReferenceDirectoryRoot`). Such properties are flagged `is_imported`.
//! - Every `ItemGroup` child with an `Include` attribute is recorded as an item.
//!
use super::evaluate::{self, PropertyScope};
use crate::common::fs::io;
use crate::common::paths;
use crate::core::error::{Result, SdkPortError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const UTF8_BOM: char = '\u{feff}';

/// A property as seen after evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectProperty {
    pub name: String,
    /// The value as written, before `$(...)` expansion.
    pub unevaluated_value: String,
    /// The value after expansion.
    pub evaluated_value: String,
    /// `true` when the value comes from an imported default rather than the project file.
    pub is_imported: bool,
}

/// A project item (`<SDKReference Include="..." />` and friends).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    /// The element name, e.g. `SDKReference` or `ProjectReference`.
    pub item_type: String,
    pub include: String,
}

/// Inputs to evaluation that do not come from the project file itself.
#[derive(Debug, Clone, Default)]
pub struct EvaluationSettings {
    /// Directory holding the solution; exposed as `$(SolutionDir)`.
    pub solution_dir: Option<PathBuf>,
    /// The `.sln` file, when known; exposed as `$(SolutionPath)` and `$(SolutionName)`.
    pub solution_file: Option<PathBuf>,
    /// Additional global properties.
    pub global_properties: BTreeMap<String, String>,
    /// Values applied for properties the project does not declare.
    pub imported_defaults: BTreeMap<String, String>,
}

/// An MSBuild project file loaded for inspection and patching.
#[derive(Debug, Clone)]
pub struct MsBuildProject {
    path: PathBuf,
    text: String,
    has_bom: bool,
    settings: EvaluationSettings,
    properties: BTreeMap<String, ProjectProperty>,
    items: Vec<ProjectItem>,
    pending_groups: Vec<(String, String)>,
}

impl MsBuildProject {
    /// Reads and evaluates the project at `path`.
    pub fn load(path: &Path, settings: &EvaluationSettings) -> Result<Self> {
        let text = io::read_file_to_string(path)?;
        Self::parse(path, &text, settings, evaluate::process_environment())
    }

    /// Evaluates project text that has already been read.
    pub fn parse<E>(
        path: &Path,
        text: &str,
        settings: &EvaluationSettings,
        environment: E,
    ) -> Result<Self>
    where
        E: IntoIterator<Item = (String, String)>,
    {
        let has_bom = text.starts_with(UTF8_BOM);
        let body = text.strip_prefix(UTF8_BOM).unwrap_or(text);

        let doc = roxmltree::Document::parse(body).map_err(|source| SdkPortError::ProjectXml {
            path: path.to_path_buf(),
            source,
        })?;
        let root = doc.root_element();
        if root.tag_name().name() != "Project" {
            anyhow::bail!(SdkPortError::ProjectLayout {
                path: path.to_path_buf(),
                reason: format!("root element is <{}>, expected <Project>", root.tag_name().name()),
            });
        }

        let mut scope = PropertyScope::new(global_properties(path, settings), environment);
        let mut properties: BTreeMap<String, ProjectProperty> = BTreeMap::new();
        let mut items = Vec::new();

        for group in root.children().filter(|n| n.is_element()) {
            match group.tag_name().name() {
                "PropertyGroup" => {
                    if group.has_attribute("Condition") {
                        debug!("Skipping conditioned PropertyGroup in {}", path.display());
                        continue;
                    }
                    for prop in group.children().filter(|n| n.is_element()) {
                        if prop.has_attribute("Condition") {
                            continue;
                        }
                        let name = prop.tag_name().name().to_string();
                        let raw = prop.text().unwrap_or("").trim().to_string();
                        // Global properties cannot be overridden from the project.
                        let evaluated = if scope.is_global(&name) {
                            scope.lookup(&name).unwrap_or_default().to_string()
                        } else {
                            scope.expand(&raw)
                        };
                        scope.define(&name, evaluated.clone());
                        properties.insert(
                            name.to_lowercase(),
                            ProjectProperty {
                                name,
                                unevaluated_value: raw,
                                evaluated_value: evaluated,
                                is_imported: false,
                            },
                        );
                    }
                }
                "ItemGroup" => {
                    for item in group.children().filter(|n| n.is_element()) {
                        if let Some(include) = item.attribute("Include") {
                            items.push(ProjectItem {
                                item_type: item.tag_name().name().to_string(),
                                include: include.to_string(),
                            });
                        }
                    }
                }
                "Import" => debug!(
                    "Not following import '{}'",
                    group.attribute("Project").unwrap_or_default()
                ),
                _ => {}
            }
        }

        for (name, raw) in &settings.imported_defaults {
            let key = name.to_lowercase();
            if properties.contains_key(&key) {
                continue;
            }
            let evaluated = scope.expand(raw);
            scope.define(name, evaluated.clone());
            properties.insert(
                key,
                ProjectProperty {
                    name: name.clone(),
                    unevaluated_value: raw.clone(),
                    evaluated_value: evaluated,
                    is_imported: true,
                },
            );
        }

        debug!(
            "Evaluated {} properties and {} items from {}",
            properties.len(),
            items.len(),
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            text: body.to_string(),
            has_bom,
            settings: settings.clone(),
            properties,
            items,
            pending_groups: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Looks a property up by case-insensitive name.
    pub fn property(&self, name: &str) -> Option<&ProjectProperty> {
        self.properties.get(&name.to_lowercase())
    }

    pub fn items(&self) -> &[ProjectItem] {
        &self.items
    }

    /// Queues a new `<PropertyGroup>` holding a single property. Nothing is
    /// written until [`MsBuildProject::save`].
    pub fn add_property_group(&mut self, name: &str, value: &str) {
        self.pending_groups
            .push((name.to_string(), value.to_string()));
    }

    /// Returns the file content with all queued property groups inserted.
    pub fn render(&self) -> Result<String> {
        let mut rendered = if self.pending_groups.is_empty() {
            self.text.clone()
        } else {
            splice_groups(&self.path, &self.text, &self.pending_groups)?
        };
        if self.has_bom {
            rendered.insert(0, UTF8_BOM);
        }
        Ok(rendered)
    }

    /// Writes the project back to its own path and re-evaluates it.
    pub fn save(&mut self) -> Result<()> {
        let rendered = self.render()?;
        io::write_string_to_file(&self.path, &rendered)?;
        info!(
            "Saved {} with {} new property group(s)",
            self.path.display(),
            self.pending_groups.len()
        );
        *self = Self::parse(
            &self.path,
            &rendered,
            &self.settings,
            evaluate::process_environment(),
        )?;
        Ok(())
    }
}

/// Global properties derived from the project location and the settings.
fn global_properties(path: &Path, settings: &EvaluationSettings) -> Vec<(String, String)> {
    let mut globals = Vec::new();
    let project_dir = path.parent().unwrap_or_else(|| Path::new(""));

    globals.push((
        "MSBuildProjectFullPath".to_string(),
        path.to_string_lossy().into_owned(),
    ));
    globals.push((
        "MSBuildProjectDirectory".to_string(),
        project_dir.to_string_lossy().into_owned(),
    ));
    globals.push((
        "ProjectDir".to_string(),
        paths::with_trailing_separator(project_dir),
    ));
    globals.push((
        "MSBuildThisFileDirectory".to_string(),
        paths::with_trailing_separator(project_dir),
    ));
    if let Some(stem) = path.file_stem() {
        globals.push((
            "MSBuildProjectName".to_string(),
            stem.to_string_lossy().into_owned(),
        ));
    }
    if let Some(dir) = &settings.solution_dir {
        globals.push(("SolutionDir".to_string(), paths::with_trailing_separator(dir)));
    }
    if let Some(file) = &settings.solution_file {
        globals.push(("SolutionPath".to_string(), file.to_string_lossy().into_owned()));
        if let Some(stem) = file.file_stem() {
            globals.push(("SolutionName".to_string(), stem.to_string_lossy().into_owned()));
        }
    }
    for (name, value) in &settings.global_properties {
        globals.push((name.clone(), value.clone()));
    }
    globals
}

/// Inserts one `<PropertyGroup>` per pending property ahead of `</Project>`.
fn splice_groups(path: &Path, text: &str, groups: &[(String, String)]) -> Result<String> {
    let doc = roxmltree::Document::parse(text).map_err(|source| SdkPortError::ProjectXml {
        path: path.to_path_buf(),
        source,
    })?;
    let root = doc.root_element();
    let range = root.range();
    let element = &text[range.clone()];

    let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
    let indent = detect_indent(text, &root);

    let mut block = String::new();
    for (name, value) in groups {
        block.push_str(&format!(
            "{indent}<PropertyGroup>{nl}{indent}{indent}<{name}>{value}</{name}>{nl}{indent}</PropertyGroup>{nl}",
            indent = indent,
            nl = newline,
            name = name,
            value = escape_xml(value),
        ));
    }

    if element.ends_with("/>") {
        // <Project ... /> becomes <Project ...> + groups + </Project>.
        let open_end = range.end - 2;
        let tag = &element[1..element
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(element.len() - 2)];
        let mut out = String::with_capacity(text.len() + block.len() + 16);
        out.push_str(text[..open_end].trim_end());
        out.push('>');
        out.push_str(newline);
        out.push_str(&block);
        out.push_str(&format!("</{}>", tag));
        out.push_str(&text[range.end..]);
        return Ok(out);
    }

    let close_start = match element.rfind("</") {
        Some(offset) => range.start + offset,
        None => anyhow::bail!(SdkPortError::ProjectLayout {
            path: path.to_path_buf(),
            reason: "closing </Project> tag not found".to_string(),
        }),
    };

    let before = &text[..close_start];
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let mut out = String::with_capacity(text.len() + block.len() + 2);
    if before[line_start..].trim().is_empty() {
        out.push_str(&text[..line_start]);
        if line_start == 0 {
            out.push_str(newline);
        }
        out.push_str(&block);
        out.push_str(&text[line_start..]);
    } else {
        out.push_str(before);
        out.push_str(newline);
        out.push_str(&block);
        out.push_str(&text[close_start..]);
    }
    Ok(out)
}

/// Indentation used by the first child element of the project, or two spaces.
fn detect_indent(text: &str, root: &roxmltree::Node) -> String {
    root.children()
        .find(|n| n.is_element())
        .and_then(|child| {
            let before = &text[..child.range().start];
            let line = &before[before.rfind('\n').map(|i| i + 1).unwrap_or(0)..];
            let line = line.trim_end_matches('\r');
            (!line.is_empty() && line.chars().all(|c| c == ' ' || c == '\t'))
                .then(|| line.to_string())
        })
        .unwrap_or_else(|| "  ".to_string())
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
