//! Specification errors.

use std::path::PathBuf;
use thiserror::Error;

/// Failures turning raw text into an [`Element`](crate::Element) tree.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read specification {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed document: {message}")]
    Malformed { message: String },
}

/// Prototype registration and resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrototypeError {
    #[error("duplicate prototype: {name}")]
    Duplicate { name: String },

    #[error("missing prototype: {name}")]
    Unknown { name: String },
}

/// Errors raised while reading a confederacy specification.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("illegal root element name {found}, expected confederacy")]
    InvalidRoot { found: String },

    #[error("unrecognized element {name}")]
    UnrecognizedElement { name: String },

    #[error("element <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    #[error("unexpected element <{element}> in '{owner}'")]
    UnexpectedElement { element: String, owner: String },

    #[error("invalid constituent <{entry}>: {reason}")]
    InvalidConstituent { entry: String, reason: String },

    #[error(transparent)]
    Prototype(#[from] PrototypeError),

    #[error("while processing confederacy element: {element}")]
    InElement {
        element: String,
        #[source]
        source: Box<SpecError>,
    },
}

impl SpecError {
    /// Wrap an error with the confederacy group element it came from.
    pub fn in_element(element: impl Into<String>, source: SpecError) -> Self {
        Self::InElement {
            element: element.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error, skipping element context wrappers.
    pub fn root_cause(&self) -> &SpecError {
        match self {
            Self::InElement { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Name of the missing prototype, if this is a resolution failure.
    pub fn missing_prototype(&self) -> Option<&str> {
        match self.root_cause() {
            Self::Prototype(PrototypeError::Unknown { name }) => Some(name),
            _ => None,
        }
    }
}
