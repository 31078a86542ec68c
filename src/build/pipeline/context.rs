//! Pipeline context for sharing state across stages.

use std::path::Path;

use crate::build::render::Template;

/// Shared, read-only context for pipeline stages.
///
/// Built once per run and borrowed by every stage for every document.
/// Holding the template here rather than in a global lets several builds
/// with different template directories run in the same process.
pub struct PipelineContext<'a> {
    /// Directory where output files are written
    pub output_dir: &'a Path,

    /// The page template every document is rendered with
    pub template: &'a Template,
}

impl<'a> PipelineContext<'a> {
    /// Create a new pipeline context.
    pub fn new(output_dir: &'a Path, template: &'a Template) -> Self {
        Self {
            output_dir,
            template,
        }
    }
}
