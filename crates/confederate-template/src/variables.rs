//! The template variable environment.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Insertion-ordered template variables. Re-inserting a key keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateVariables {
    values: IndexMap<String, Value>,
}

impl TemplateVariables {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Set several variables, later entries winning.
    pub fn extend<I, K, V>(&mut self, variables: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in variables {
            self.insert(name, value);
        }
    }

    /// Variable by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// String form of a variable, as written to the dump.
    pub fn get_display(&self, name: &str) -> Option<String> {
        self.get(name).map(format_value)
    }

    /// Whether a variable is set.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Variables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `key=value` lines in iteration order.
    pub fn to_dump(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.values {
            out.push_str(name);
            out.push('=');
            out.push_str(&format_value(value));
            out.push('\n');
        }
        out
    }

    /// Write the dump to `path`, replacing any previous file.
    pub fn write_dump(&self, path: &Path) -> std::io::Result<()> {
        let mut file = std::fs::File::create(path)?;
        file.write_all(self.to_dump().as_bytes())?;
        file.flush()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for TemplateVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut variables = Self::new();
        variables.extend(iter);
        variables
    }
}

/// Strings print raw; everything else prints as compact JSON.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dump_has_one_line_per_variable() {
        let variables: TemplateVariables = [("name", "x"), ("count", "3")].into_iter().collect();
        assert_eq!(variables.to_dump(), "name=x\ncount=3\n");
    }

    #[test]
    fn test_write_dump_contains_exactly_the_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template_variables.tmp");
        std::fs::write(&path, "stale=1\nold=2\nlines=3\n").unwrap();

        let variables: TemplateVariables = [("name", "x"), ("count", "3")].into_iter().collect();
        variables.write_dump(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["name=x", "count=3"]);
    }

    #[test]
    fn test_non_string_values_print_as_json() {
        let mut variables = TemplateVariables::new();
        variables.insert("flag", true);
        variables.insert("count", 3);
        variables.insert("nested", json!({"a": [1, 2]}));
        variables.insert("nothing", Value::Null);

        assert_eq!(
            variables.to_dump(),
            "flag=true\ncount=3\nnested={\"a\":[1,2]}\nnothing=null\n"
        );
    }

    #[test]
    fn test_reinsert_keeps_position_and_updates_value() {
        let mut variables = TemplateVariables::new();
        variables.insert("a", "1");
        variables.insert("b", "2");
        variables.insert("a", "3");

        let keys: Vec<_> = variables.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(variables.get_display("a").as_deref(), Some("3"));
        assert!(variables.contains("b"));
        assert_eq!(variables.len(), 2);
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let variables: TemplateVariables = [("org", "acme")].into_iter().collect();
        assert_eq!(serde_json::to_value(&variables).unwrap(), json!({"org": "acme"}));
    }
}
