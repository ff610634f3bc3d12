//! Reads confederacy documents into a [`Confederacy`].

use std::path::Path;

use tracing::debug;

use crate::constituent::CONSTITUENTS_SECTION;
use crate::element::Element;
use crate::error::{DocumentError, SpecError};
use crate::model::{Confederacy, SpecificationSource};
use crate::project::ProjectDefinition;
use crate::prototype::{FragmentData, PrototypeRegistry};

/// Required root element name.
pub const CONFEDERACY_ELEMENT: &str = "confederacy";
/// Group of project entries.
pub const PROJECTS_GROUP: &str = "projects";
/// Group of prototype entries.
pub const PROTOTYPES_GROUP: &str = "prototypes";
/// Entry identifier attribute.
pub const NAME_ATTRIBUTE: &str = "name";
/// Comma-separated prototype references.
pub const PROTOTYPE_ATTRIBUTE: &str = "prototype";

/// Walks a confederacy document, registering prototypes and resolving projects.
///
/// Prototype references are resolved as entries are read, so a prototype must
/// be declared before any entry that uses it.
#[derive(Debug, Default)]
pub struct SpecificationReader {
    registry: PrototypeRegistry,
}

struct Entry {
    name: String,
    prototypes: Vec<String>,
    data: FragmentData,
}

impl SpecificationReader {
    /// Create a reader with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader whose registry already holds shared prototypes.
    pub fn with_registry(registry: PrototypeRegistry) -> Self {
        Self { registry }
    }

    /// Prototypes registered so far.
    pub fn registry(&self) -> &PrototypeRegistry {
        &self.registry
    }

    /// Read a specification file.
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> Result<Confederacy, SpecError> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let root = Element::parse(&xml)?;
        self.read(&root, SpecificationSource::from_path(path))
    }

    /// Read a specification held in memory.
    pub fn read_str(&mut self, xml: &str) -> Result<Confederacy, SpecError> {
        let root = Element::parse(xml)?;
        self.read(&root, SpecificationSource::default())
    }

    /// Read an already parsed document.
    pub fn read(
        &mut self,
        root: &Element,
        source: SpecificationSource,
    ) -> Result<Confederacy, SpecError> {
        if root.name() != CONFEDERACY_ELEMENT {
            return Err(SpecError::InvalidRoot {
                found: root.name().to_string(),
            });
        }

        debug!(source = %source, "reading confederacy");
        let mut confederacy = Confederacy::new(source);

        for group in root.children() {
            self.read_group(&mut confederacy, group)
                .map_err(|e| SpecError::in_element(group.name(), e))?;
        }

        debug!(
            projects = confederacy.projects().len(),
            prototypes = self.registry.len(),
            "confederacy read"
        );
        Ok(confederacy)
    }

    fn read_group(&mut self, confederacy: &mut Confederacy, group: &Element) -> Result<(), SpecError> {
        match group.name() {
            PROJECTS_GROUP => {
                for entry in group.children() {
                    let project = self.read_project(entry, confederacy.specification_source())?;
                    confederacy.add_project(project);
                }
                Ok(())
            }
            PROTOTYPES_GROUP => {
                for entry in group.children() {
                    self.register_prototype(entry)?;
                }
                Ok(())
            }
            other => Err(SpecError::UnrecognizedElement {
                name: other.to_string(),
            }),
        }
    }

    /// Register one prototype entry. Its own prototype references are flattened now.
    pub fn register_prototype(&mut self, element: &Element) -> Result<(), SpecError> {
        let entry = read_entry(element)?;
        let data = self.registry.resolve(entry.prototypes.as_slice())?.merged(&entry.data);
        self.registry.register(entry.name, data)?;
        Ok(())
    }

    /// Parse and resolve one project entry.
    pub fn read_project(
        &self,
        element: &Element,
        source: &SpecificationSource,
    ) -> Result<ProjectDefinition, SpecError> {
        let entry = read_entry(element)?;
        let data = self.registry.resolve(entry.prototypes.as_slice())?.merged(&entry.data);

        let mut project = ProjectDefinition::from_resolved(entry.name, entry.prototypes, data);
        project.constituents()?;
        project.set_specification_source(source.clone());
        project.set_base_directory(".");

        debug!(
            project = %project.id(),
            prototypes = ?project.prototypes(),
            "resolved project"
        );
        Ok(project)
    }
}

fn read_entry(element: &Element) -> Result<Entry, SpecError> {
    let name = element
        .attribute(NAME_ATTRIBUTE)
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| SpecError::MissingAttribute {
            element: element.name().to_string(),
            attribute: NAME_ATTRIBUTE.to_string(),
        })?
        .to_string();

    let prototypes = element
        .attribute(PROTOTYPE_ATTRIBUTE)
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut data = FragmentData::new();
    for (key, value) in element.attributes() {
        if key != NAME_ATTRIBUTE && key != PROTOTYPE_ATTRIBUTE {
            data.set_attribute(key, value);
        }
    }

    for child in element.children() {
        if child.has_children() || child.name() == CONSTITUENTS_SECTION {
            data.append_section(child.name(), child.children().iter().cloned());
        } else if child.attributes().is_empty() {
            data.set_attribute(child.name(), child.text());
        } else {
            return Err(SpecError::UnexpectedElement {
                element: child.name().to_string(),
                owner: name,
            });
        }
    }

    Ok(Entry {
        name,
        prototypes,
        data,
    })
}
