//! Project kinds and their generation hooks.

use std::fmt;

use confederate_spec::ProjectDefinition;
use tracing::debug;

use crate::builtin::{ACTIVITY_CONF, PROJECT_XML};
use crate::context::GenerationContext;
use crate::error::TemplateError;
use crate::hooks::TemplateHooks;
use crate::templater::Templater;

/// Variable holding the activity runtime type.
pub const ACTIVITY_TYPE: &str = "activityType";
/// Variable holding the activity executable name.
pub const ACTIVITY_EXECUTABLE: &str = "activityExecutable";

const DEFAULT_ACTIVITY_TYPE: &str = "native";

/// The closed set of supported project kinds, chosen by the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    /// Constituents only.
    Generic,
    /// An activity with a project descriptor and runtime configuration.
    Activity,
}

impl ProjectKind {
    /// Parse a kind name.
    pub fn from_name(name: &str) -> Result<Self, TemplateError> {
        match name {
            "generic" => Ok(Self::Generic),
            "activity" => Ok(Self::Activity),
            other => Err(TemplateError::UnknownProjectKind {
                kind: other.to_string(),
            }),
        }
    }

    /// Kind of a project, from its `type` attribute.
    pub fn for_project(project: &ProjectDefinition) -> Result<Self, TemplateError> {
        Self::from_name(project.kind())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Activity => "activity",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TemplateHooks for ProjectKind {
    fn on_setup(
        &self,
        context: &mut GenerationContext,
        _templater: &Templater,
    ) -> Result<(), TemplateError> {
        if let Self::Activity = self {
            let project = context.project();
            let activity_type = project
                .attribute(ACTIVITY_TYPE)
                .unwrap_or(DEFAULT_ACTIVITY_TYPE)
                .to_string();
            let executable = project
                .attribute("executable")
                .unwrap_or(project.id())
                .to_string();

            let variables = context.variables_mut();
            variables.insert(ACTIVITY_TYPE, activity_type);
            variables.insert(ACTIVITY_EXECUTABLE, executable);
        }
        Ok(())
    }

    fn on_write(
        &self,
        context: &mut GenerationContext,
        templater: &Templater,
    ) -> Result<(), TemplateError> {
        if let Self::Activity = self {
            for name in [PROJECT_XML, ACTIVITY_CONF] {
                let destination = context.project_directory().join(name);
                debug!(file = %destination.display(), "writing activity descriptor");
                templater.render_named_to_file(name, &destination, context.variables())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ProjectKind::from_name("generic").unwrap(), ProjectKind::Generic);
        assert_eq!(ProjectKind::from_name("activity").unwrap(), ProjectKind::Activity);

        match ProjectKind::from_name("library").unwrap_err() {
            TemplateError::UnknownProjectKind { kind } => assert_eq!(kind, "library"),
            other => panic!("expected UnknownProjectKind, got {other:?}"),
        }
    }

    #[test]
    fn test_for_project_defaults_to_generic() {
        let project = ProjectDefinition::new("demo");
        assert_eq!(ProjectKind::for_project(&project).unwrap(), ProjectKind::Generic);
        assert_eq!(ProjectKind::Activity.to_string(), "activity");
    }

    #[test]
    fn test_activity_setup_seeds_defaults() {
        let templater = Templater::new().unwrap();
        let project = ProjectDefinition::new("blinker").with_attribute("type", "activity");
        let mut context = GenerationContext::new(project, "/out", "/templates");

        ProjectKind::Activity.on_setup(&mut context, &templater).unwrap();

        assert_eq!(
            context.variables().get_display(ACTIVITY_TYPE).as_deref(),
            Some("native")
        );
        assert_eq!(
            context.variables().get_display(ACTIVITY_EXECUTABLE).as_deref(),
            Some("blinker")
        );
    }

    #[test]
    fn test_activity_setup_uses_attributes() {
        let templater = Templater::new().unwrap();
        let project = ProjectDefinition::new("blinker")
            .with_attribute("activityType", "script")
            .with_attribute("executable", "blink.sh");
        let mut context = GenerationContext::new(project, "/out", "/templates");

        ProjectKind::Activity.on_setup(&mut context, &templater).unwrap();

        assert_eq!(
            context.variables().get_display(ACTIVITY_TYPE).as_deref(),
            Some("script")
        );
        assert_eq!(
            context.variables().get_display(ACTIVITY_EXECUTABLE).as_deref(),
            Some("blink.sh")
        );
    }

    #[test]
    fn test_generic_hooks_do_nothing() {
        let templater = Templater::new().unwrap();
        let mut context =
            GenerationContext::new(ProjectDefinition::new("demo"), "/nonexistent", "/templates");

        ProjectKind::Generic.on_setup(&mut context, &templater).unwrap();
        ProjectKind::Generic.on_write(&mut context, &templater).unwrap();
        assert!(context.variables().is_empty());
    }
}
