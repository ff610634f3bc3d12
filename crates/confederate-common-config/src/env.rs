//! Environment variable handling.

use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to load .env file: {0}")]
    DotenvError(#[from] dotenvy::Error),
}

/// Environment variable names.
pub mod vars {
    // Configuration
    pub const CONFEDERATE_CONFIG_PATH: &str = "CONFEDERATE_CONFIG_PATH";

    // Generation overrides
    pub const CONFEDERATE_OUTPUT_DIR: &str = "CONFEDERATE_OUTPUT_DIR";
    pub const CONFEDERATE_TEMPLATE_ROOT: &str = "CONFEDERATE_TEMPLATE_ROOT";
    pub const CONFEDERATE_FAILURE_POLICY: &str = "CONFEDERATE_FAILURE_POLICY";
    pub const CONFEDERATE_DUMP_FILE: &str = "CONFEDERATE_DUMP_FILE";
}

/// Environment configuration.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Initialize environment from .env files.
    ///
    /// `.env` is loaded first, then `.env.local`. Neither file is required and
    /// variables already set in the process are never overwritten.
    pub fn init() -> Result<Self, EnvError> {
        for file in [".env", ".env.local"] {
            match dotenvy::from_filename(file) {
                Ok(_) => {}
                Err(e) if e.not_found() => {}
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self { _guard: () })
    }
}
