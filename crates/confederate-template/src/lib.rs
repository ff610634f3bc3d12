//! Project generation for confederacies.
//!
//! A [`TemplateEngine`] takes one [`GenerationContext`] through three stages:
//! setup seeds the well-known variables and creates the project directory,
//! the project kind's [`TemplateHooks`] run, and then every constituent is
//! processed in declaration order. A failure in any stage writes the variable
//! environment to a dump file before being returned.

pub mod builtin;
pub mod constituent;
pub mod context;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod kind;
pub mod resource;
pub mod templater;
pub mod variables;

pub use builtin::BuiltinTemplates;
pub use constituent::ProcessConstituent;
pub use context::{
    absolutize, GenerationContext, BASE_DIRECTORY, INTERNAL_TEMPLATES, PROJECT, PROJECT_DIRECTORY,
    SPEC,
};
pub use engine::{TemplateEngine, DEFAULT_DUMP_FILE};
pub use error::{GenerationError, RenderError, ResourceError, TemplateError};
pub use hooks::{CallbackHooks, TemplateHooks};
pub use kind::ProjectKind;
pub use resource::{FileResource, ResourceSource};
pub use templater::Templater;
pub use variables::TemplateVariables;
