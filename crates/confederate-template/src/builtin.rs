//! Built-in templates used by project kinds.

/// Activity project descriptor.
pub const PROJECT_XML: &str = "project.xml";

/// Activity runtime configuration.
pub const ACTIVITY_CONF: &str = "activity.conf";

const PROJECT_XML_TEMPLATE: &str = r#"<?xml version="1.0"?>
<project type="activity">
  <name>{{project.id}}</name>
  <identifyingName>{{project.id}}</identifyingName>

  <activity type="{{activityType}}">
    <name>{{project.id}}</name>
    <executable>{{activityExecutable}}</executable>
  </activity>
</project>
"#;

const ACTIVITY_CONF_TEMPLATE: &str = "\
space.activity.name={{project.id}}
space.activity.type={{activityType}}
space.activity.executable={{activityExecutable}}
";

/// Built-in templates registry
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    /// All built-in templates as `(name, source)` pairs.
    pub fn all() -> &'static [(&'static str, &'static str)] {
        &[
            (PROJECT_XML, PROJECT_XML_TEMPLATE),
            (ACTIVITY_CONF, ACTIVITY_CONF_TEMPLATE),
        ]
    }

    /// Get a built-in template by name
    pub fn get(name: &str) -> Option<&'static str> {
        Self::all()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, content)| *content)
    }
}
