//! Configuration types for Confederate.
//!
//! This crate provides the configuration used by Confederate for
//! `.confederate/config.yaml` files.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
