use std::path::PathBuf;

use crate::config::SiteConfig;

use super::pipeline::{BatchReport, Pipeline, PipelineContext};
use super::render::{RenderError, Template};
use super::source::{SourceError, discover_documents};

/// Errors that abort a build before any document is processed.
///
/// Problems with individual documents are not errors at this level; they
/// are recorded in the [`BatchReport`].
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Template(#[from] RenderError),

    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

#[derive(Debug)]
pub struct BuildResult {
    pub output_dir: PathBuf,
    pub report: BatchReport,
}

pub struct Builder {
    config: SiteConfig,
    pipeline: Pipeline,
}

impl Builder {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            pipeline: Pipeline::default(),
        }
    }

    pub fn build(&self) -> Result<BuildResult, BuildError> {
        // Build steps:
        // 1. Create the output directory
        // 2. Load the page template
        // 3. Discover markdown documents
        // 4. Run each document through the pipeline

        let output_dir = self.config.output.clone();
        std::fs::create_dir_all(&output_dir).map_err(|e| BuildError::CreateOutputDir {
            path: output_dir.clone(),
            source: e,
        })?;

        let template = Template::load(&self.config.template_dir, &self.config.template)?;
        tracing::debug!(
            template = template.name(),
            stages = ?self.pipeline.stage_names(),
            "pipeline ready"
        );

        let sources = discover_documents(&self.config.input)?;
        tracing::info!(
            input = %self.config.input.display(),
            documents = sources.len(),
            "found markdown documents"
        );

        let ctx = PipelineContext::new(&output_dir, &template);
        let report = self.pipeline.run(&sources, &ctx);

        tracing::info!(
            output = %output_dir.display(),
            documents = report.len(),
            written = report.written_count(),
            skipped = report.failed_count(),
            "build finished"
        );

        Ok(BuildResult { output_dir, report })
    }
}
