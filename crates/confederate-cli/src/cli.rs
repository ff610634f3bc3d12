//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use confederate_common_config::{vars, ConfederateConfig, ConfigLoader};

use crate::commands::{CheckCommand, CreateCommand};
use crate::error::CliError;

/// Confederate - scaffold related projects from one specification
///
/// Projects inherit shared attributes and constituents from named prototypes
/// and are generated through templates.
#[derive(Debug, Parser)]
#[command(
    name = "confederate",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = vars::CONFEDERATE_CONFIG_PATH,
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file"
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate every project of a specification
    #[command(visible_alias = "new")]
    Create(CreateCommand),

    /// Read and resolve a specification without writing anything
    Check(CheckCommand),
}

impl Cli {
    /// Load configuration from the given file or `.confederate/config.yaml`.
    pub fn load_config(&self) -> Result<ConfederateConfig, CliError> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::default(),
        };
        Ok(loader.load()?)
    }

    /// Execute the selected command
    pub fn execute(self, config: ConfederateConfig) -> Result<(), CliError> {
        let ctx = CommandContext {
            config,
            quiet: self.quiet,
            verbose: self.verbose,
        };

        match self.command {
            Command::Create(cmd) => cmd.execute(&ctx),
            Command::Check(cmd) => cmd.execute(&ctx),
        }
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: ConfederateConfig,
    pub quiet: bool,
    pub verbose: u8,
}
