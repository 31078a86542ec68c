//! Markdown rendering stage.

use crate::build::markdown::render_markdown;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that converts the markdown body to an HTML fragment.
///
/// After this stage, `doc.content` contains HTML.
pub struct MarkdownStage;

impl Stage for MarkdownStage {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        _ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        doc.content = render_markdown(&doc.content)?;
        Ok(())
    }
}
