//! Per-project generation context.

use std::path::{Path, PathBuf};

use confederate_spec::ProjectDefinition;
use serde_json::Value;

use crate::variables::TemplateVariables;

/// Well-known variable: absolute base directory.
pub const BASE_DIRECTORY: &str = "baseDirectory";
/// Well-known variable: absolute project output directory.
pub const PROJECT_DIRECTORY: &str = "projectDirectory";
/// Well-known variable: absolute internal template root.
pub const INTERNAL_TEMPLATES: &str = "internalTemplates";
/// Well-known variable: description of the context itself.
pub const SPEC: &str = "spec";
/// Well-known variable: the serialized project.
pub const PROJECT: &str = "project";

/// Everything one project's generation reads and mutates.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    project: ProjectDefinition,
    variables: TemplateVariables,
    template_root: PathBuf,
}

impl GenerationContext {
    /// Create a context whose environment holds the project's own variables.
    ///
    /// The project's base directory becomes `base_directory`.
    pub fn new(
        project: ProjectDefinition,
        base_directory: impl Into<PathBuf>,
        template_root: impl Into<PathBuf>,
    ) -> Self {
        Self::for_project(project, std::iter::empty(), base_directory, template_root)
    }

    /// Create a context whose environment holds `shared` then the project's own variables.
    pub fn for_project<'a, I>(
        mut project: ProjectDefinition,
        shared: I,
        base_directory: impl Into<PathBuf>,
        template_root: impl Into<PathBuf>,
    ) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        project.set_base_directory(base_directory);

        let mut variables = TemplateVariables::new();
        variables.extend(shared.into_iter().map(|(k, v)| (k.clone(), v.clone())));
        variables.extend(
            project
                .template_variables()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        Self {
            project,
            variables,
            template_root: template_root.into(),
        }
    }

    /// The project being generated.
    pub fn project(&self) -> &ProjectDefinition {
        &self.project
    }

    /// Current variable environment.
    pub fn variables(&self) -> &TemplateVariables {
        &self.variables
    }

    /// Mutable variable environment.
    pub fn variables_mut(&mut self) -> &mut TemplateVariables {
        &mut self.variables
    }

    /// Directory projects are generated under.
    pub fn base_directory(&self) -> &Path {
        self.project.base_directory()
    }

    /// Root that constituent sources resolve against.
    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    /// Output directory of this project.
    pub fn project_directory(&self) -> PathBuf {
        self.base_directory().join(self.project.directory())
    }

    /// Resolve a constituent source against the template root.
    pub fn resolve_source(&self, source: &str) -> PathBuf {
        self.template_root.join(source)
    }

    /// Resolve a rendered destination against the project directory.
    pub fn resolve_destination(&self, destination: &str) -> PathBuf {
        self.project_directory().join(destination)
    }

    pub(crate) fn set_base_directory(&mut self, base_directory: PathBuf) {
        self.project.set_base_directory(base_directory);
    }

    pub(crate) fn set_template_root(&mut self, template_root: PathBuf) {
        self.template_root = template_root;
    }
}

/// Make `path` absolute against the working directory without touching the filesystem.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
