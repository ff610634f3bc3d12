//! The per-project generation pipeline.

use std::path::{Path, PathBuf};

use confederate_common_log::spans::record_error;
use serde_json::json;
use tracing::{debug, error};

use crate::constituent::ProcessConstituent;
use crate::context::{
    absolutize, GenerationContext, BASE_DIRECTORY, INTERNAL_TEMPLATES, PROJECT, PROJECT_DIRECTORY,
    SPEC,
};
use crate::error::{GenerationError, RenderError, TemplateError};
use crate::hooks::TemplateHooks;
use crate::kind::ProjectKind;
use crate::templater::Templater;

/// Dump file written when generation fails, relative to the working directory.
pub const DEFAULT_DUMP_FILE: &str = "template_variables.tmp";

/// Runs setup, the kind hooks and constituent processing for one project.
///
/// Any stage failure aborts the project. Before the failure is returned the
/// variable environment, exactly as it stood, is written to the dump file.
pub struct TemplateEngine {
    templater: Templater,
    dump_file: PathBuf,
}

impl TemplateEngine {
    /// Create an engine dumping to [`DEFAULT_DUMP_FILE`].
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self {
            templater: Templater::new()?,
            dump_file: PathBuf::from(DEFAULT_DUMP_FILE),
        })
    }

    /// Builder: dump to `path` instead. Relative paths resolve against the working directory.
    pub fn with_dump_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.dump_file = path.into();
        self
    }

    /// Configured dump file.
    pub fn dump_file(&self) -> &Path {
        &self.dump_file
    }

    /// The templater used for every stage.
    pub fn templater(&self) -> &Templater {
        &self.templater
    }

    /// Generate a project using the hooks of its declared kind.
    pub fn process(&self, context: &mut GenerationContext) -> Result<(), GenerationError> {
        self.run(context, None)
    }

    /// Generate a project using injected hooks instead of its kind's.
    pub fn process_with_hooks(
        &self,
        context: &mut GenerationContext,
        hooks: &dyn TemplateHooks,
    ) -> Result<(), GenerationError> {
        self.run(context, Some(hooks))
    }

    fn run(
        &self,
        context: &mut GenerationContext,
        hooks: Option<&dyn TemplateHooks>,
    ) -> Result<(), GenerationError> {
        match self.stages(context, hooks) {
            Ok(()) => Ok(()),
            Err(source) => Err(self.dump(context, source)),
        }
    }

    fn stages(
        &self,
        context: &mut GenerationContext,
        hooks: Option<&dyn TemplateHooks>,
    ) -> Result<(), TemplateError> {
        self.setup(context)?;

        let kind;
        let hooks: &dyn TemplateHooks = match hooks {
            Some(hooks) => hooks,
            None => {
                kind = ProjectKind::for_project(context.project())?;
                &kind
            }
        };

        hooks.on_setup(context, &self.templater)?;
        hooks.on_write(context, &self.templater)?;
        self.process_constituents(context)
    }

    fn setup(&self, context: &mut GenerationContext) -> Result<(), TemplateError> {
        let base_directory = absolutize(context.base_directory())
            .map_err(|source| TemplateError::io(context.base_directory(), source))?;
        let template_root = absolutize(context.template_root())
            .map_err(|source| TemplateError::io(context.template_root(), source))?;
        context.set_base_directory(base_directory.clone());
        context.set_template_root(template_root.clone());

        let project_directory = context.project_directory();
        let project = serde_json::to_value(context.project())?;

        let base_directory = base_directory.display().to_string();
        let project_directory_str = project_directory.display().to_string();
        let template_root = template_root.display().to_string();

        let variables = context.variables_mut();
        variables.insert(BASE_DIRECTORY, base_directory.clone());
        variables.insert(PROJECT_DIRECTORY, project_directory_str.clone());
        variables.insert(INTERNAL_TEMPLATES, template_root.clone());
        variables.insert(
            SPEC,
            json!({
                "project": project.clone(),
                "baseDirectory": base_directory,
                "projectDirectory": project_directory_str,
                "internalTemplates": template_root,
            }),
        );
        variables.insert(PROJECT, project);

        debug!(directory = %project_directory.display(), "creating project directory");
        std::fs::create_dir_all(&project_directory)
            .map_err(|source| TemplateError::io(&project_directory, source))
    }

    fn process_constituents(&self, context: &mut GenerationContext) -> Result<(), TemplateError> {
        let constituents = context.project().constituents()?;
        for constituent in &constituents {
            constituent.process(None, context, &self.templater)?;
        }
        Ok(())
    }

    fn dump(&self, context: &GenerationContext, source: TemplateError) -> GenerationError {
        record_error(&source);

        let dump_path = absolutize(&self.dump_file).unwrap_or_else(|_| self.dump_file.clone());
        match context.variables().write_dump(&dump_path) {
            Ok(()) => {
                error!(
                    project = %context.project().id(),
                    dump = %dump_path.display(),
                    error = %source,
                    "project generation failed"
                );
                GenerationError::Failed { dump_path, source }
            }
            Err(error) => {
                error!(
                    project = %context.project().id(),
                    dump = %dump_path.display(),
                    error = %source,
                    dump_error = %error,
                    "project generation failed and the variable dump could not be written"
                );
                GenerationError::DumpFailed {
                    dump_path,
                    error,
                    source,
                }
            }
        }
    }
}
