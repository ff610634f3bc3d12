//! Template and generation errors.

use std::path::PathBuf;

use confederate_spec::SpecError;

/// Render errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors placing a static resource.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("resource not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// A failure in one stage of a project's generation.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Spec(#[from] SpecError),

    #[error("unknown project type '{kind}', expected generic or activity")]
    UnknownProjectKind { kind: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize template variables: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{stage} hook failed: {message}")]
    Hook { stage: &'static str, message: String },
}

impl TemplateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A project's generation failed as a whole.
///
/// The variable environment at the moment of failure was dumped to `dump_path`;
/// the stage failure stays reachable through [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("template variables can be found in {}", dump_path.display())]
    Failed {
        dump_path: PathBuf,
        #[source]
        source: TemplateError,
    },

    #[error("error writing variable dump file {}: {error}", dump_path.display())]
    DumpFailed {
        dump_path: PathBuf,
        error: std::io::Error,
        #[source]
        source: TemplateError,
    },
}

impl GenerationError {
    /// Absolute path of the variable dump.
    pub fn dump_path(&self) -> &std::path::Path {
        match self {
            Self::Failed { dump_path, .. } | Self::DumpFailed { dump_path, .. } => dump_path,
        }
    }

    /// The stage failure that aborted generation.
    pub fn cause(&self) -> &TemplateError {
        match self {
            Self::Failed { source, .. } | Self::DumpFailed { source, .. } => source,
        }
    }

    /// The I/O error hit while writing the dump, if any.
    pub fn dump_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::Failed { .. } => None,
            Self::DumpFailed { error, .. } => Some(error),
        }
    }
}
