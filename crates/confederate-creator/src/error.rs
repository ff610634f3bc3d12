//! Creator errors.

use confederate_template::RenderError;

/// Errors setting up a creator. Project failures are reported, not raised.
#[derive(Debug, thiserror::Error)]
pub enum CreatorError {
    #[error("failed to initialize template engine: {0}")]
    Engine(#[from] RenderError),
}
