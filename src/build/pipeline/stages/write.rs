//! File writing stage.
//!
//! Writes the final HTML output to the filesystem.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that writes the rendered page to its output path.
///
/// The output directory is created by the builder before any document is
/// processed, so only the file itself is written here.
pub struct WriteStage;

impl Stage for WriteStage {
    fn name(&self) -> &'static str {
        "write"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        _ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let html = doc.output_html.as_ref().ok_or_else(|| {
            PipelineError::stage(
                "write",
                format!(
                    "document '{}' has no output HTML (was template stage run?)",
                    doc.source.path.display()
                ),
            )
        })?;

        std::fs::write(&doc.output_path, html)
            .map_err(|e| PipelineError::io(&doc.output_path, e))?;

        Ok(())
    }
}
