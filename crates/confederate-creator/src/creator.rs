//! Confederacy creation.

use std::path::{Path, PathBuf};

use confederate_common_config::FailurePolicy;
use confederate_common_log::spans::{confederacy_span, project_span, Timer};
use confederate_spec::{Confederacy, ProjectDefinition};
use confederate_template::{absolutize, GenerationContext, GenerationError, TemplateEngine};
use tracing::{error, info, warn};

use crate::error::CreatorError;
use crate::options::CreatorOptions;
use crate::report::{error_chain, CreationReport, ProjectOutcome, ProjectStatus};

/// Generates every project of a confederacy, one after another.
pub struct ConfederacyCreator {
    engine: TemplateEngine,
    options: CreatorOptions,
}

impl ConfederacyCreator {
    pub fn new(options: CreatorOptions) -> Result<Self, CreatorError> {
        let engine = TemplateEngine::new()?.with_dump_file(options.dump_file());
        Ok(Self { engine, options })
    }

    pub fn options(&self) -> &CreatorOptions {
        &self.options
    }

    /// Create every project in model order.
    ///
    /// Project failures are logged and recorded in the report, never returned.
    /// Under [`FailurePolicy::AbortOnFirstFailure`] the projects after the
    /// first failure are reported as skipped and nothing is written for them.
    pub fn create(&self, confederacy: &Confederacy) -> CreationReport {
        let span = confederacy_span(&confederacy.specification_source().to_string());
        let _guard = span.enter();
        let timer = Timer::start("create_confederacy");

        let output_directory = self.output_directory();
        info!(
            projects = confederacy.projects().len(),
            output = %output_directory.display(),
            policy = %self.options.failure_policy(),
            "creating confederacy"
        );

        let mut report = CreationReport::new();
        let mut aborted = false;

        for project in confederacy.projects() {
            let directory = output_directory.join(project.directory());

            if aborted {
                warn!(project = %project.id(), "skipping project after earlier failure");
                report.push(ProjectOutcome::new(
                    project.id(),
                    directory,
                    ProjectStatus::Skipped,
                ));
                continue;
            }

            let status = match self.create_project(confederacy, project, &output_directory) {
                Ok(()) => {
                    info!(project = %project.id(), directory = %directory.display(), "project generated");
                    ProjectStatus::Generated
                }
                Err(e) => {
                    error!(
                        project = %project.id(),
                        error = %error_chain(&e),
                        "error while creating confederacy"
                    );
                    if self.options.failure_policy() == FailurePolicy::AbortOnFirstFailure {
                        aborted = true;
                    }
                    ProjectStatus::Failed(e)
                }
            };
            report.push(ProjectOutcome::new(project.id(), directory, status));
        }

        info!(summary = %report.summary(), "confederacy creation finished");
        timer.finish();
        report
    }

    /// Generate a single project of `confederacy` under `output_directory`.
    pub fn create_project(
        &self,
        confederacy: &Confederacy,
        project: &ProjectDefinition,
        output_directory: &Path,
    ) -> Result<(), GenerationError> {
        let span = project_span(project.id());
        let _guard = span.enter();

        let mut context = GenerationContext::for_project(
            project.clone(),
            confederacy.template_variables(),
            output_directory,
            self.options.template_root(),
        );
        self.engine.process(&mut context)
    }

    fn output_directory(&self) -> PathBuf {
        let configured = self.options.output_directory();
        absolutize(configured).unwrap_or_else(|_| configured.to_path_buf())
    }
}
