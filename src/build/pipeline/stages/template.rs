//! Page template rendering stage.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};
use crate::build::render::PageContext;

/// Stage that applies the page template to rendered content.
///
/// The template sees the HTML as `content`, the front matter as
/// `metadata` and derived page information as `page`.
///
/// After this stage, `doc.output_html` contains the complete HTML page.
pub struct TemplateStage;

impl Stage for TemplateStage {
    fn name(&self) -> &'static str {
        "template"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let page_context = PageContext {
            content: &doc.content,
            metadata: &doc.metadata,
            page: doc.page_info(),
        };

        let html = ctx.template.render(&page_context)?;
        doc.output_html = Some(html);

        Ok(())
    }
}
