//! Confederate CLI
//!
//! Main entry point for the `confederate` binary.

use std::process::ExitCode;

use clap::Parser;
use confederate_cli::{Cli, CliError};
use confederate_common_config::Environment;
use confederate_common_log::{vars, LogConfig, LogLevel};
use confederate_creator::error_chain;
use tracing::{error, warn};

fn main() -> ExitCode {
    // Loaded first so .env files can set CONFEDERATE_* variables read below.
    let env = Environment::init();
    let cli = Cli::parse();

    if let Err(e) = confederate_common_log::init(log_config(&cli)) {
        eprintln!("warning: {e}");
    }

    if let Err(e) = env {
        warn!(error = %e, "failed to load environment files");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = e.code(), "{}", error_chain(&e));
            if let Some(hint) = e.hint() {
                eprintln!("hint: {hint}");
            }
            e.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;
    cli.execute(config)
}

fn log_config(cli: &Cli) -> LogConfig {
    let config = LogConfig::from_env();
    let explicit_level = std::env::var_os(vars::LOG_LEVEL).is_some();

    match cli.verbose {
        _ if cli.quiet => config.with_level(LogLevel::Error),
        0 if explicit_level => config,
        0 => config.with_level(LogLevel::Warn),
        1 => config.with_level(LogLevel::Info),
        2 => config.with_level(LogLevel::Debug),
        _ => config.with_level(LogLevel::Trace),
    }
}
