//! CLI error handling.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use confederate_common_config::ConfigError;
use confederate_creator::CreatorError;
use confederate_spec::SpecError;
use thiserror::Error;

/// CLI error type with exit codes and hints
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Spec {
        message: String,
        #[source]
        source: SpecError,
    },

    #[error("{failed} of {total} projects failed to generate")]
    Generation { failed: usize, total: usize },

    #[error("{message}")]
    Usage { message: String, hint: Option<String> },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Spec { .. } => "E003",
            Self::Generation { .. } => "E004",
            Self::Usage { .. } => "E005",
            Self::Other(_) => "E999",
        }
    }

    /// Numeric process exit status.
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Spec { .. } => 5,
            Self::Generation { .. } => 6,
            Self::Usage { .. } | Self::Other(_) => 1,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } | Self::Usage { hint, .. } => hint.as_deref(),
            Self::Generation { .. } => {
                Some("inspect the variable dump named in the log to see the failing state")
            }
            _ => None,
        }
    }

    /// Create a usage error
    pub fn usage(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an IO error with path
    pub fn io_with_path(
        message: impl Into<String>,
        source: io::Error,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source,
            path: Some(path.into()),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: "I/O error".to_string(),
            source: err,
            path: None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: "failed to load configuration".to_string(),
            source: Some(Box::new(err)),
            hint: Some("check your .confederate/config.yaml file".to_string()),
        }
    }
}

impl From<SpecError> for CliError {
    fn from(err: SpecError) -> Self {
        Self::Spec {
            message: "failed to read specification".to_string(),
            source: err,
        }
    }
}

impl From<CreatorError> for CliError {
    fn from(err: CreatorError) -> Self {
        Self::Other(anyhow::Error::new(err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(anyhow::Error::new(err).context("failed to encode output"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_statuses() {
        assert_eq!(CliError::usage("bad", "fix it").exit_status(), 1);
        assert_eq!(
            CliError::Generation { failed: 1, total: 2 }.exit_status(),
            6
        );
        assert_eq!(
            CliError::from(io::Error::new(io::ErrorKind::Other, "boom")).exit_status(),
            3
        );
        assert_eq!(
            CliError::from(ConfigError::ValidationError {
                message: "empty dump_file".to_string()
            })
            .exit_status(),
            2
        );
    }

    #[test]
    fn test_spec_error_keeps_source() {
        let err = CliError::from(SpecError::UnrecognizedElement {
            name: "modules".to_string(),
        });
        assert_eq!(err.code(), "E003");
        assert_eq!(err.exit_status(), 5);
        assert_eq!(
            confederate_creator::error_chain(&err),
            "failed to read specification: unrecognized element modules"
        );
    }

    #[test]
    fn test_generation_message() {
        let err = CliError::Generation { failed: 2, total: 3 };
        assert_eq!(err.to_string(), "2 of 3 projects failed to generate");
        assert!(err.hint().is_some());
    }
}
