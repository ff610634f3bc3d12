//! Per-project outcomes of a creation run.

use std::fmt;
use std::path::{Path, PathBuf};

use confederate_template::GenerationError;

/// What happened to one project.
#[derive(Debug)]
pub enum ProjectStatus {
    Generated,
    Failed(GenerationError),
    /// Never attempted because an earlier project failed.
    Skipped,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Failed(_) => "failed",
            Self::Skipped => "skipped",
        }
    }
}

/// Outcome of one project.
#[derive(Debug)]
pub struct ProjectOutcome {
    project: String,
    directory: PathBuf,
    status: ProjectStatus,
}

impl ProjectOutcome {
    pub fn new(project: impl Into<String>, directory: impl Into<PathBuf>, status: ProjectStatus) -> Self {
        Self {
            project: project.into(),
            directory: directory.into(),
            status,
        }
    }

    /// Project id.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Output directory of the project, whether or not it was written.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn status(&self) -> &ProjectStatus {
        &self.status
    }

    /// The generation failure, if the project failed.
    pub fn error(&self) -> Option<&GenerationError> {
        match &self.status {
            ProjectStatus::Failed(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for ProjectOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<9} {} ({})",
            self.status.as_str(),
            self.project,
            self.directory.display()
        )?;
        if let Some(error) = self.error() {
            write!(f, ": {}", error_chain(error))?;
        }
        Ok(())
    }
}

/// Outcomes of every project, in model order.
#[derive(Debug, Default)]
pub struct CreationReport {
    outcomes: Vec<ProjectOutcome>,
}

impl CreationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: ProjectOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[ProjectOutcome] {
        &self.outcomes
    }

    /// Outcome of a project by id.
    pub fn outcome(&self, project: &str) -> Option<&ProjectOutcome> {
        self.outcomes.iter().find(|o| o.project == project)
    }

    /// True when no project failed or was skipped.
    pub fn is_success(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o.status, ProjectStatus::Generated))
    }

    pub fn generated(&self) -> impl Iterator<Item = &ProjectOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ProjectStatus::Generated))
    }

    pub fn failures(&self) -> impl Iterator<Item = &ProjectOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ProjectStatus::Failed(_)))
    }

    pub fn skipped(&self) -> impl Iterator<Item = &ProjectOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ProjectStatus::Skipped))
    }

    /// One-line count of each status.
    pub fn summary(&self) -> String {
        format!(
            "{} generated, {} failed, {} skipped",
            self.generated().count(),
            self.failures().count(),
            self.skipped().count()
        )
    }
}

/// An error and all of its sources joined with `": "`.
pub fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use confederate_template::TemplateError;

    fn failed() -> ProjectStatus {
        ProjectStatus::Failed(GenerationError::Failed {
            dump_path: PathBuf::from("/work/template_variables.tmp"),
            source: TemplateError::UnknownProjectKind {
                kind: "library".to_string(),
            },
        })
    }

    #[test]
    fn test_summary_counts() {
        let mut report = CreationReport::new();
        report.push(ProjectOutcome::new("a", "/out/a", ProjectStatus::Generated));
        report.push(ProjectOutcome::new("b", "/out/b", failed()));
        report.push(ProjectOutcome::new("c", "/out/c", ProjectStatus::Skipped));

        assert!(!report.is_success());
        assert_eq!(report.summary(), "1 generated, 1 failed, 1 skipped");
        assert_eq!(report.failures().next().unwrap().project(), "b");
        assert!(report.outcome("c").unwrap().error().is_none());
    }

    #[test]
    fn test_empty_report_is_success() {
        assert!(CreationReport::new().is_success());
        assert_eq!(CreationReport::new().summary(), "0 generated, 0 failed, 0 skipped");
    }

    #[test]
    fn test_outcome_display_includes_chain() {
        let outcome = ProjectOutcome::new("b", "/out/b", failed());
        let line = outcome.to_string();
        assert!(line.starts_with("failed"));
        assert!(line.contains("template variables can be found in /work/template_variables.tmp"));
        assert!(line.contains("unknown project type 'library'"));
    }
}
