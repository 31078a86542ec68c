//! Front matter stage.

use crate::build::document::parse_front_matter;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that separates the front matter from the markdown body.
///
/// After this stage, `doc.metadata` holds the parsed front matter and
/// `doc.content` the markdown that followed it. Malformed front matter
/// fails the document as a whole.
pub struct FrontMatterStage;

impl Stage for FrontMatterStage {
    fn name(&self) -> &'static str {
        "front_matter"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        _ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let parsed = parse_front_matter(&doc.source.raw_text)?;
        doc.metadata = parsed.metadata;
        doc.content = parsed.body;
        Ok(())
    }
}
