//! Check command implementation.

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use confederate_common_log::timed;
use confederate_spec::{Confederacy, Constituent, ProjectDefinition};
use serde_json::json;

use crate::cli::CommandContext;
use crate::error::CliError;

/// Read and resolve a specification without writing anything
#[derive(Debug, Parser)]
pub struct CheckCommand {
    /// Specification document
    #[arg(value_hint = ValueHint::FilePath)]
    pub spec: PathBuf,

    /// Output format
    #[arg(long, default_value = "text", value_enum)]
    pub format: CheckFormat,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CheckFormat {
    #[default]
    Text,
    Json,
}

impl CheckCommand {
    pub fn execute(&self, _ctx: &CommandContext) -> Result<(), CliError> {
        let confederacy = timed!("read_specification", confederate_spec::read_file(&self.spec))?;

        match self.format {
            CheckFormat::Text => print!("{}", render_text(&confederacy)?),
            CheckFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&render_json(&confederacy)?)?)
            }
        }
        Ok(())
    }
}

fn render_text(confederacy: &Confederacy) -> Result<String, CliError> {
    let mut out = format!(
        "{} project(s) in {}\n",
        confederacy.projects().len(),
        confederacy.specification_source()
    );

    for project in confederacy.projects() {
        out.push_str(&format!(
            "\n{} [{}] -> {}\n",
            project.id(),
            project.kind(),
            project.directory()
        ));
        if !project.prototypes().is_empty() {
            out.push_str(&format!("  prototypes: {}\n", project.prototypes().join(", ")));
        }
        for (name, value) in project.attributes() {
            out.push_str(&format!("  {name} = {value}\n"));
        }
        for constituent in project.constituents()? {
            out.push_str(&format!("  {}\n", describe(&constituent)));
        }
    }

    Ok(out)
}

fn render_json(confederacy: &Confederacy) -> Result<serde_json::Value, CliError> {
    let projects = confederacy
        .projects()
        .iter()
        .map(project_json)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(json!({
        "source": confederacy.specification_source().to_string(),
        "projects": projects,
    }))
}

fn project_json(project: &ProjectDefinition) -> Result<serde_json::Value, CliError> {
    Ok(json!({
        "id": project.id(),
        "kind": project.kind(),
        "directory": project.directory(),
        "prototypes": project.prototypes(),
        "attributes": project.attributes(),
        "constituents": project.constituents()?,
    }))
}

fn describe(constituent: &Constituent) -> String {
    match constituent {
        Constituent::Template {
            source,
            destination,
        } => format!("template {source} -> {destination}"),
        Constituent::Resource {
            source,
            destination,
        } => format!("resource {source} -> {destination}"),
        Constituent::Variable { name, value } => format!("variable {name} = {value}"),
        Constituent::Directory { path } => format!("directory {path}"),
    }
}
