//! Pipeline error types.

use std::path::PathBuf;

use crate::build::document::FrontMatterError;
use crate::build::markdown::MarkdownError;
use crate::build::render::RenderError;

/// Errors that can occur while processing a single document.
///
/// None of these abort a build; the document is skipped and the error is
/// recorded in the [`BatchReport`](super::BatchReport).
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("malformed metadata: {0}")]
    Metadata(#[from] FrontMatterError),

    #[error("markdown conversion failed: {0}")]
    Markdown(#[from] MarkdownError),

    #[error("template rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl PipelineError {
    /// Create a stage-specific error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
