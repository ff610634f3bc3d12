//! Generic element tree for specification documents.

use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;

use crate::error::DocumentError;

/// A document node: name, ordered attributes, element children and trimmed text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    name: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    attributes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Element>,
    #[serde(skip_serializing_if = "String::is_empty")]
    text: String,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Builder: set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Parse an XML document and return its root element.
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader.read_event().map_err(|source| DocumentError::Xml {
                position: reader.buffer_position() as u64,
                source,
            })?;

            match event {
                Event::Start(start) => {
                    let element = Self::from_start(&start).map_err(|source| DocumentError::Xml {
                        position: reader.buffer_position() as u64,
                        source,
                    })?;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = Self::from_start(&start).map_err(|source| DocumentError::Xml {
                        position: reader.buffer_position() as u64,
                        source,
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| DocumentError::Malformed {
                        message: "closing tag without matching opening tag".to_string(),
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|source| DocumentError::Xml {
                        position: reader.buffer_position() as u64,
                        source,
                    })?;
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text);
                    }
                }
                Event::CData(data) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(DocumentError::Malformed {
                message: format!("unclosed element <{}>", open.name),
            });
        }

        root.ok_or_else(|| DocumentError::Malformed {
            message: "document has no root element".to_string(),
        })
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, quick_xml::Error> {
        let mut element = Self::new(String::from_utf8_lossy(start.name().as_ref()));

        for attribute in start.attributes() {
            let attribute = attribute.map_err(quick_xml::Error::from)?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute.unescape_value()?.into_owned();
            element.attributes.insert(key, value);
        }

        Ok(element)
    }

    /// Element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Element children in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Whether the element has element children.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Trimmed text content.
    pub fn text(&self) -> &str {
        &self.text
    }
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    mut element: Element,
) -> Result<(), DocumentError> {
    element.text = element.text.trim().to_string();

    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }

    if root.is_some() {
        return Err(DocumentError::Malformed {
            message: format!("multiple root elements, found <{}>", element.name),
        });
    }

    *root = Some(element);
    Ok(())
}
