//! Constituent declarations attached to a project.

use serde::Serialize;

use crate::element::Element;
use crate::error::SpecError;

/// Section holding a project's constituents.
pub const CONSTITUENTS_SECTION: &str = "constituents";

/// A unit of generation work, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constituent {
    /// Render a template file.
    Template { source: String, destination: String },
    /// Copy a file or directory.
    Resource { source: String, destination: String },
    /// Add a rendered variable visible to later constituents.
    Variable { name: String, value: String },
    /// Create an empty directory.
    Directory { path: String },
}

impl Constituent {
    /// Build a constituent from a section entry.
    pub fn from_element(entry: &Element) -> Result<Self, SpecError> {
        match entry.name() {
            "template" => Ok(Self::Template {
                source: required(entry, "source")?,
                destination: required(entry, "destination")?,
            }),
            "resource" => Ok(Self::Resource {
                source: required(entry, "source")?,
                destination: required(entry, "destination")?,
            }),
            "variable" => {
                let name = required(entry, "name")?;
                let value = match entry.attribute("value") {
                    Some(value) => value.to_string(),
                    None if !entry.text().is_empty() => entry.text().to_string(),
                    None => return Err(invalid(entry, "missing 'value' attribute or text")),
                };
                Ok(Self::Variable { name, value })
            }
            "directory" => Ok(Self::Directory {
                path: required(entry, "path")?,
            }),
            other => Err(invalid(
                entry,
                format!(
                    "unknown constituent '{}', expected template, resource, variable or directory",
                    other
                ),
            )),
        }
    }

    /// Short name of the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Template { .. } => "template",
            Self::Resource { .. } => "resource",
            Self::Variable { .. } => "variable",
            Self::Directory { .. } => "directory",
        }
    }

    /// The path or name this constituent produces.
    pub fn target(&self) -> &str {
        match self {
            Self::Template { destination, .. } | Self::Resource { destination, .. } => destination,
            Self::Variable { name, .. } => name,
            Self::Directory { path } => path,
        }
    }
}

fn required(entry: &Element, attribute: &str) -> Result<String, SpecError> {
    match entry.attribute(attribute) {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(invalid(entry, format!("missing '{}' attribute", attribute))),
    }
}

fn invalid(entry: &Element, reason: impl Into<String>) -> SpecError {
    SpecError::InvalidConstituent {
        entry: entry.name().to_string(),
        reason: reason.into(),
    }
}
