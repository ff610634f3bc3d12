//! Confederate CLI Library
//!
//! Argument parsing, commands and error reporting for the `confederate` binary.

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Command, CommandContext};
pub use error::CliError;
