//! Configuration types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default name of the variable dump written when a project fails to generate.
pub const DEFAULT_DUMP_FILE: &str = "template_variables.tmp";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfederateConfig {
    /// Generation settings.
    pub generation: GenerationConfig,
    /// Shared template variables, in declaration order.
    pub variables: IndexMap<String, serde_json::Value>,
}

/// Generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Directory generated projects land in. Defaults to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Root that constituent sources resolve against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_root: Option<PathBuf>,
    /// What to do with the remaining projects once one fails.
    pub failure_policy: FailurePolicy,
    /// Variable dump written on generation failure.
    pub dump_file: PathBuf,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            template_root: None,
            failure_policy: FailurePolicy::default(),
            dump_file: PathBuf::from(DEFAULT_DUMP_FILE),
        }
    }
}

/// Behaviour of a confederacy run after a project fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Attempt every project and report every outcome.
    #[default]
    CollectAll,
    /// Stop at the first failure; later projects are skipped.
    AbortOnFirstFailure,
}

impl FailurePolicy {
    /// Name used in configuration files and environment overrides.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CollectAll => "collect_all",
            Self::AbortOnFirstFailure => "abort_on_first_failure",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "collect_all" => Ok(Self::CollectAll),
            "abort_on_first_failure" | "fail_fast" => Ok(Self::AbortOnFirstFailure),
            other => Err(format!(
                "unknown failure policy '{}', expected collect_all or abort_on_first_failure",
                other
            )),
        }
    }
}
