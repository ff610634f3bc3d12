//! The confederacy model.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::project::ProjectDefinition;

/// Where a specification came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecificationSource {
    path: Option<PathBuf>,
    description: String,
}

impl SpecificationSource {
    /// A specification read from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            description: path.display().to_string(),
            path: Some(path),
        }
    }

    /// A specification without a backing file.
    pub fn inline(description: impl Into<String>) -> Self {
        Self {
            path: None,
            description: description.into(),
        }
    }

    /// File the specification was read from.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Human-readable origin.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Directory containing the specification file.
    pub fn directory(&self) -> Option<&Path> {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(|p| if p.as_os_str().is_empty() { Path::new(".") } else { p })
    }
}

impl Default for SpecificationSource {
    fn default() -> Self {
        Self::inline("<inline>")
    }
}

impl fmt::Display for SpecificationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// A set of projects generated together, with shared template variables.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Confederacy {
    projects: Vec<ProjectDefinition>,
    template_variables: IndexMap<String, serde_json::Value>,
    specification_source: SpecificationSource,
}

impl Confederacy {
    /// Create an empty confederacy.
    pub fn new(specification_source: SpecificationSource) -> Self {
        Self {
            projects: Vec::new(),
            template_variables: IndexMap::new(),
            specification_source,
        }
    }

    /// Append a project. Insertion order is generation order.
    pub fn add_project(&mut self, project: ProjectDefinition) {
        self.projects.push(project);
    }

    /// Projects in declaration order.
    pub fn projects(&self) -> &[ProjectDefinition] {
        &self.projects
    }

    /// First project with the given id.
    pub fn project(&self, id: &str) -> Option<&ProjectDefinition> {
        self.projects.iter().find(|p| p.id() == id)
    }

    /// Set a shared template variable.
    pub fn add_template_variable(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.template_variables.insert(name.into(), value.into());
    }

    /// Set several shared template variables, later entries winning.
    pub fn extend_template_variables<I, K>(&mut self, variables: I)
    where
        I: IntoIterator<Item = (K, serde_json::Value)>,
        K: Into<String>,
    {
        for (name, value) in variables {
            self.template_variables.insert(name.into(), value);
        }
    }

    /// Shared template variables.
    pub fn template_variables(&self) -> &IndexMap<String, serde_json::Value> {
        &self.template_variables
    }

    /// Where the specification came from.
    pub fn specification_source(&self) -> &SpecificationSource {
        &self.specification_source
    }
}
