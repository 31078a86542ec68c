//! Build pipeline for document processing.
//!
//! The pipeline transforms each document through a series of stages:
//! 1. Front matter splitting (metadata + markdown body)
//! 2. Markdown rendering (to an HTML fragment)
//! 3. Template rendering (page template wrapper)
//! 4. File writing (output to disk)
//!
//! Documents are processed one at a time and independently. A stage failing
//! for one document ends that document's processing only; the failure is
//! recorded in the [`BatchReport`] and the run moves on to the next one.

mod context;
mod document;
mod error;
mod report;
mod stages;

use std::path::{Path, PathBuf};

pub use context::PipelineContext;
pub use document::ProcessingDocument;
pub use error::PipelineError;
pub use report::{BatchReport, DocumentOutcome};

use stages::{FrontMatterStage, MarkdownStage, TemplateStage, WriteStage};

/// Name recorded for failures that happen while reading a source file.
const READ_STAGE: &str = "read";

/// A stage in the document processing pipeline.
///
/// Stages transform one document at a time. The `ctx` provides access to
/// shared, read-only resources like the page template.
pub trait Stage: Send + Sync {
    /// Unique name for this stage (used in failure reports).
    fn name(&self) -> &'static str;

    /// Process a document through this stage, modifying it in place.
    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError>;
}

/// The document processing pipeline.
///
/// Orchestrates document transformation through a series of stages.
/// The default pipeline is: front_matter → markdown → template → write.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Create the default pipeline with standard stages.
    ///
    /// Stages: front_matter → markdown → template → write
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(FrontMatterStage);
        pipeline.add_stage(MarkdownStage);
        pipeline.add_stage(TemplateStage);
        pipeline.add_stage(WriteStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Run every source file through the pipeline.
    ///
    /// Never fails as a whole: each source gets exactly one outcome in the
    /// returned report, either the page it produced or the error that
    /// stopped it.
    pub fn run(&self, sources: &[PathBuf], ctx: &PipelineContext) -> BatchReport {
        let mut report = BatchReport::new();

        for source in sources {
            let outcome = match self.process_document(source, ctx) {
                Ok(output) => {
                    tracing::info!(output = %output.display(), "generated page");
                    DocumentOutcome::Written {
                        source: source.clone(),
                        output,
                    }
                }
                Err((stage, error)) => {
                    tracing::warn!(
                        source = %source.display(),
                        stage,
                        "skipped document: {error}"
                    );
                    DocumentOutcome::Failed {
                        source: source.clone(),
                        stage,
                        error,
                    }
                }
            };
            report.record(outcome);
        }

        report
    }

    /// Load one document and run it through every stage.
    ///
    /// Returns the output path on success, or the name of the failing stage
    /// together with its error.
    fn process_document(
        &self,
        source: &Path,
        ctx: &PipelineContext,
    ) -> Result<PathBuf, (&'static str, PipelineError)> {
        let mut doc =
            ProcessingDocument::load(source, ctx.output_dir).map_err(|e| (READ_STAGE, e))?;

        for stage in &self.stages {
            stage
                .process(&mut doc, ctx)
                .map_err(|e| (stage.name(), e))?;
        }

        Ok(doc.output_path)
    }

    /// Get the names of all stages in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
