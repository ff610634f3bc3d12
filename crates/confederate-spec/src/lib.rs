//! Confederacy specifications.
//!
//! A confederacy document declares reusable prototypes and the projects built
//! from them. Reading a document resolves every project against its prototypes
//! up front, producing a [`Confederacy`] ready for generation.
//!
//! ```xml
//! <confederacy>
//!   <prototypes>
//!     <project name="base" language="java"/>
//!   </prototypes>
//!   <projects>
//!     <project name="demo" prototype="base" language="python"/>
//!   </projects>
//! </confederacy>
//! ```

pub mod constituent;
pub mod element;
pub mod error;
pub mod model;
pub mod project;
pub mod prototype;
pub mod reader;

pub use constituent::Constituent;
pub use element::Element;
pub use error::{DocumentError, PrototypeError, SpecError};
pub use model::{Confederacy, SpecificationSource};
pub use project::ProjectDefinition;
pub use prototype::{FragmentData, PrototypeFragment, PrototypeRegistry};
pub use reader::SpecificationReader;

use std::path::Path;

/// Read a specification file with a fresh prototype registry.
pub fn read_file(path: impl AsRef<Path>) -> Result<Confederacy, SpecError> {
    SpecificationReader::new().read_file(path)
}

/// Read an in-memory specification with a fresh prototype registry.
pub fn read_str(xml: &str) -> Result<Confederacy, SpecError> {
    SpecificationReader::new().read_str(xml)
}
