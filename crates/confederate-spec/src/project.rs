//! Resolved project definitions.

use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::constituent::{Constituent, CONSTITUENTS_SECTION};
use crate::element::Element;
use crate::model::SpecificationSource;
use crate::prototype::FragmentData;

/// Attribute selecting the project kind.
pub const KIND_ATTRIBUTE: &str = "type";

/// Attribute overriding the output directory name.
pub const DIRECTORY_ATTRIBUTE: &str = "directory";

/// Kind used when a project declares none.
pub const DEFAULT_KIND: &str = "generic";

/// A project's configuration after prototype resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDefinition {
    id: String,
    prototypes: Vec<String>,
    attributes: IndexMap<String, String>,
    sections: IndexMap<String, Vec<Element>>,
    base_directory: PathBuf,
    specification_source: SpecificationSource,
}

impl ProjectDefinition {
    /// Create a project with no prototypes or data.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prototypes: Vec::new(),
            attributes: IndexMap::new(),
            sections: IndexMap::new(),
            base_directory: PathBuf::from("."),
            specification_source: SpecificationSource::default(),
        }
    }

    /// Create a project from already resolved data.
    pub fn from_resolved(id: impl Into<String>, prototypes: Vec<String>, data: FragmentData) -> Self {
        let (attributes, sections) = data.into_parts();
        Self {
            prototypes,
            attributes,
            sections,
            ..Self::new(id)
        }
    }

    /// Builder: set a scalar attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: append a constituent entry.
    pub fn with_constituent(mut self, entry: Element) -> Self {
        self.sections
            .entry(CONSTITUENTS_SECTION.to_string())
            .or_default()
            .push(entry);
        self
    }

    /// Project identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Declared prototype references, in order.
    pub fn prototypes(&self) -> &[String] {
        &self.prototypes
    }

    /// Resolved scalar attributes.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Resolved list-valued sections.
    pub fn sections(&self) -> &IndexMap<String, Vec<Element>> {
        &self.sections
    }

    /// Typed constituents, in declaration order.
    pub fn constituents(&self) -> Result<Vec<Constituent>, crate::SpecError> {
        self.sections
            .get(CONSTITUENTS_SECTION)
            .map(|entries| entries.iter().map(Constituent::from_element).collect())
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    /// Kind name from the `type` attribute.
    pub fn kind(&self) -> &str {
        self.attribute(KIND_ATTRIBUTE).unwrap_or(DEFAULT_KIND)
    }

    /// Output directory name, relative to the base directory.
    pub fn directory(&self) -> &str {
        self.attribute(DIRECTORY_ATTRIBUTE).unwrap_or(&self.id)
    }

    /// Variables this project contributes to its generation context.
    pub fn template_variables(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Directory the project is generated under.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Override the base directory.
    pub fn set_base_directory(&mut self, base_directory: impl Into<PathBuf>) {
        self.base_directory = base_directory.into();
    }

    /// Where this project was declared.
    pub fn specification_source(&self) -> &SpecificationSource {
        &self.specification_source
    }

    /// Set the specification provenance.
    pub fn set_specification_source(&mut self, source: SpecificationSource) {
        self.specification_source = source;
    }
}
