//! Creates all projects of a confederacy.
//!
//! ```no_run
//! use confederate_creator::{ConfederacyCreator, CreatorOptions};
//!
//! let confederacy = confederate_spec::read_file("confederacy.xml")?;
//! let creator = ConfederacyCreator::new(CreatorOptions::new("out", "templates"))?;
//! let report = creator.create(&confederacy);
//! println!("{}", report.summary());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod creator;
pub mod error;
pub mod options;
pub mod report;

pub use confederate_common_config::FailurePolicy;
pub use creator::ConfederacyCreator;
pub use error::CreatorError;
pub use options::CreatorOptions;
pub use report::{error_chain, CreationReport, ProjectOutcome, ProjectStatus};
