//! Creator inputs.

use std::path::{Path, PathBuf};

use confederate_common_config::{FailurePolicy, GenerationConfig};
use confederate_template::DEFAULT_DUMP_FILE;

/// Where and how a confederacy is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorOptions {
    output_directory: PathBuf,
    template_root: PathBuf,
    dump_file: PathBuf,
    failure_policy: FailurePolicy,
}

impl CreatorOptions {
    /// Generate under `output_directory`, resolving sources against `template_root`.
    pub fn new(output_directory: impl Into<PathBuf>, template_root: impl Into<PathBuf>) -> Self {
        Self {
            output_directory: output_directory.into(),
            template_root: template_root.into(),
            dump_file: PathBuf::from(DEFAULT_DUMP_FILE),
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Options from the `generation` configuration section.
    ///
    /// A missing output directory means the working directory and a missing
    /// template root means `.`.
    pub fn from_config(config: &GenerationConfig) -> std::io::Result<Self> {
        let output_directory = match &config.output_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let template_root = config
            .template_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self::new(output_directory, template_root)
            .with_dump_file(config.dump_file.clone())
            .with_failure_policy(config.failure_policy))
    }

    pub fn with_output_directory(mut self, output_directory: impl Into<PathBuf>) -> Self {
        self.output_directory = output_directory.into();
        self
    }

    pub fn with_template_root(mut self, template_root: impl Into<PathBuf>) -> Self {
        self.template_root = template_root.into();
        self
    }

    pub fn with_dump_file(mut self, dump_file: impl Into<PathBuf>) -> Self {
        self.dump_file = dump_file.into();
        self
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Directory projects are generated under.
    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Root constituent sources resolve against.
    pub fn template_root(&self) -> &Path {
        &self.template_root
    }

    /// Variable dump written when a project fails.
    pub fn dump_file(&self) -> &Path {
        &self.dump_file
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }
}
