//! Constituent processing.

use confederate_common_log::spans::constituent_span;
use confederate_spec::Constituent;
use tracing::debug;

use crate::context::GenerationContext;
use crate::error::TemplateError;
use crate::resource::{FileResource, ResourceSource};
use crate::templater::Templater;

/// A unit of generation work that runs against a project's context.
pub trait ProcessConstituent {
    /// Apply this constituent. It may add variables seen by later constituents.
    fn process(
        &self,
        parent: Option<&Constituent>,
        context: &mut GenerationContext,
        templater: &Templater,
    ) -> Result<(), TemplateError>;
}

impl ProcessConstituent for Constituent {
    fn process(
        &self,
        parent: Option<&Constituent>,
        context: &mut GenerationContext,
        templater: &Templater,
    ) -> Result<(), TemplateError> {
        let span = constituent_span(self.kind(), self.target());
        let _guard = span.enter();

        if let Some(parent) = parent {
            debug!(parent = %parent.kind(), "processing nested constituent");
        }

        match self {
            Constituent::Template {
                source,
                destination,
            } => {
                let source = context.resolve_source(source);
                let destination =
                    context.resolve_destination(&templater.render_str(destination, context.variables())?);
                debug!(source = %source.display(), destination = %destination.display(), "rendering template");
                templater.render_file(&source, &destination, context.variables())?;
            }
            Constituent::Resource {
                source,
                destination,
            } => {
                let resource = FileResource::new(context.resolve_source(source));
                let destination =
                    context.resolve_destination(&templater.render_str(destination, context.variables())?);
                debug!(source = %resource.location(), destination = %destination.display(), "copying resource");
                resource.copy_to(&destination)?;
            }
            Constituent::Variable { name, value } => {
                let value = templater.render_str(value, context.variables())?;
                debug!(variable = %name, "adding template variable");
                context.variables_mut().insert(name.clone(), value);
            }
            Constituent::Directory { path } => {
                let directory =
                    context.resolve_destination(&templater.render_str(path, context.variables())?);
                std::fs::create_dir_all(&directory)
                    .map_err(|source| TemplateError::io(&directory, source))?;
            }
        }

        Ok(())
    }
}
