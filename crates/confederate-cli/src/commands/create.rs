//! Create command implementation.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueHint};
use confederate_common_log::timed;
use confederate_creator::{ConfederacyCreator, CreatorOptions, FailurePolicy};
use confederate_spec::Confederacy;
use serde_json::Value;
use tracing::info;

use crate::cli::CommandContext;
use crate::error::CliError;

/// Generate every project of a specification
#[derive(Debug, Parser)]
pub struct CreateCommand {
    /// Specification document
    #[arg(value_hint = ValueHint::FilePath)]
    pub spec: PathBuf,

    /// Directory projects are generated under (default: current directory)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Root that template and resource sources resolve against
    /// (default: the specification's directory)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    pub template_root: Option<PathBuf>,

    /// Set a shared template variable
    #[arg(
        short = 'D',
        long = "define",
        value_name = "KEY=VALUE",
        value_parser = parse_define
    )]
    pub defines: Vec<(String, String)>,

    /// Stop at the first failing project
    #[arg(long)]
    pub fail_fast: bool,

    /// File the variable environment is dumped to when a project fails
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub dump_file: Option<PathBuf>,
}

impl CreateCommand {
    pub fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut confederacy = timed!("read_specification", confederate_spec::read_file(&self.spec))?;
        self.apply_variables(&mut confederacy, ctx);

        let options = self.options(&confederacy, ctx)?;
        info!(
            spec = %self.spec.display(),
            output = %options.output_directory().display(),
            templates = %options.template_root().display(),
            "creating confederacy"
        );

        let creator = ConfederacyCreator::new(options)?;
        let report = creator.create(&confederacy);

        if !ctx.quiet {
            for outcome in report.outcomes() {
                println!("{outcome}");
            }
            println!("{}", report.summary());
        }

        let failed = report.failures().count();
        if failed > 0 {
            return Err(CliError::Generation {
                failed,
                total: report.outcomes().len(),
            });
        }
        Ok(())
    }

    /// Configuration variables first, then `-D` definitions.
    fn apply_variables(&self, confederacy: &mut Confederacy, ctx: &CommandContext) {
        confederacy.extend_template_variables(ctx.config.variables.clone());
        confederacy.extend_template_variables(
            self.defines
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone()))),
        );
    }

    fn options(
        &self,
        confederacy: &Confederacy,
        ctx: &CommandContext,
    ) -> Result<CreatorOptions, CliError> {
        let generation = &ctx.config.generation;
        let mut options = CreatorOptions::from_config(generation)
            .map_err(|e| CliError::io_with_path("failed to resolve working directory", e, "."))?;

        if generation.template_root.is_none() {
            let spec_directory = confederacy
                .specification_source()
                .directory()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            options = options.with_template_root(spec_directory);
        }
        if let Some(output) = &self.output {
            options = options.with_output_directory(output);
        }
        if let Some(template_root) = &self.template_root {
            options = options.with_template_root(template_root);
        }
        if let Some(dump_file) = &self.dump_file {
            options = options.with_dump_file(dump_file);
        }
        if self.fail_fast {
            options = options.with_failure_policy(FailurePolicy::AbortOnFirstFailure);
        }

        if options.output_directory().is_file() {
            return Err(CliError::usage(
                format!(
                    "output path {} is not a directory",
                    options.output_directory().display()
                ),
                "pass a directory to --output or set generation.output_dir",
            ));
        }

        Ok(options)
    }
}

/// Parse a `KEY=VALUE` definition.
pub fn parse_define(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_define() {
        assert_eq!(
            parse_define("org=acme").unwrap(),
            ("org".to_string(), "acme".to_string())
        );
        assert_eq!(
            parse_define("url=a=b").unwrap(),
            ("url".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_define("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_define("novalue").is_err());
        assert!(parse_define("=x").is_err());
    }
}
