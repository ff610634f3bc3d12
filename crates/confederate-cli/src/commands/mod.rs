//! Command implementations.

mod check;
mod create;

pub use check::{CheckCommand, CheckFormat};
pub use create::{parse_define, CreateCommand};
