//! Handlebars rendering.

use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;

use crate::builtin::BuiltinTemplates;
use crate::error::RenderError;

/// Renders templates against a variable environment.
///
/// Strict mode is on, so a reference to a missing variable is an error.
/// Output is never HTML-escaped.
pub struct Templater {
    handlebars: Handlebars<'static>,
}

impl Templater {
    /// Create a templater with the built-in templates registered.
    pub fn new() -> Result<Self, RenderError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, content) in BuiltinTemplates::all() {
            handlebars.register_template_string(name, *content)?;
        }

        Ok(Self { handlebars })
    }

    /// Render an inline template string.
    pub fn render_str<T: Serialize>(&self, template: &str, data: &T) -> Result<String, RenderError> {
        Ok(self.handlebars.render_template(template, data)?)
    }

    /// Render a registered template.
    pub fn render_named<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        Ok(self.handlebars.render(name, data)?)
    }

    /// Whether a named template is registered.
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Render the template file at `source` into `destination`.
    pub fn render_file<T: Serialize>(
        &self,
        source: &Path,
        destination: &Path,
        data: &T,
    ) -> Result<(), RenderError> {
        let template = std::fs::read_to_string(source).map_err(|e| RenderError::Read {
            path: source.to_path_buf(),
            source: e,
        })?;
        let content = self.render_str(&template, data)?;
        write_output(destination, &content)
    }

    /// Render a registered template into `destination`.
    pub fn render_named_to_file<T: Serialize>(
        &self,
        name: &str,
        destination: &Path,
        data: &T,
    ) -> Result<(), RenderError> {
        let content = self.render_named(name, data)?;
        write_output(destination, &content)
    }
}

fn write_output(destination: &Path, content: &str) -> Result<(), RenderError> {
    let write_error = |source| RenderError::Write {
        path: destination.to_path_buf(),
        source,
    };

    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(destination, content).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_str_substitutes_variables() {
        let templater = Templater::new().unwrap();
        let out = templater
            .render_str("{{name}} has {{count}} items", &json!({"name": "demo", "count": 3}))
            .unwrap();
        assert_eq!(out, "demo has 3 items");
    }

    #[test]
    fn test_output_is_not_html_escaped() {
        let templater = Templater::new().unwrap();
        let out = templater
            .render_str("{{value}}", &json!({"value": "<a & b>"}))
            .unwrap();
        assert_eq!(out, "<a & b>");
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let templater = Templater::new().unwrap();
        let err = templater
            .render_str("Hello {{missing}}", &json!({}))
            .unwrap_err();
        assert!(matches!(err, RenderError::Render(_)));
    }

    #[test]
    fn test_nested_lookup() {
        let templater = Templater::new().unwrap();
        let out = templater
            .render_str("{{project.id}}", &json!({"project": {"id": "demo"}}))
            .unwrap();
        assert_eq!(out, "demo");
    }

    #[test]
    fn test_render_file_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.template");
        std::fs::write(&source, "id={{id}}\n").unwrap();
        let destination = dir.path().join("out/nested/file.txt");

        let templater = Templater::new().unwrap();
        templater
            .render_file(&source, &destination, &json!({"id": "p1"}))
            .unwrap();

        assert_eq!(std::fs::read_to_string(destination).unwrap(), "id=p1\n");
    }

    #[test]
    fn test_render_file_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let templater = Templater::new().unwrap();
        let err = templater
            .render_file(
                &dir.path().join("absent.template"),
                &dir.path().join("out"),
                &json!({}),
            )
            .unwrap_err();
        assert!(matches!(err, RenderError::Read { .. }));
    }

    #[test]
    fn test_builtins_are_registered() {
        let templater = Templater::new().unwrap();
        for (name, _) in BuiltinTemplates::all() {
            assert!(templater.has_template(name), "missing builtin {name}");
        }
    }
}
