//! Document types for pipeline processing.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::build::document::{Metadata, SourceDocument};
use crate::build::paths::source_to_output_path;
use crate::build::pipeline::PipelineError;
use crate::build::render::PageInfo;

/// A document being processed through the pipeline.
///
/// Wraps the source document with state that evolves through the stages:
///
/// 1. Initially: `content` = raw file text, `metadata` = empty
/// 2. After front_matter: `content` = markdown body, `metadata` = parsed
/// 3. After markdown: `content` = HTML fragment
/// 4. After template: `output_html` = final page HTML
#[derive(Debug)]
pub struct ProcessingDocument {
    /// The document as read from disk
    pub source: SourceDocument,

    /// Where the finished page will be written
    pub output_path: PathBuf,

    /// Front matter, empty until the front_matter stage runs
    pub metadata: Metadata,

    /// Content being processed.
    pub content: String,

    /// Final HTML output after template rendering.
    ///
    /// None until the template stage populates it.
    pub output_html: Option<String>,
}

impl ProcessingDocument {
    /// Create a processing document from a source document.
    pub fn new(source: SourceDocument, output_path: PathBuf) -> Self {
        let content = source.raw_text.clone();
        Self {
            source,
            output_path,
            metadata: Metadata::new(),
            content,
            output_html: None,
        }
    }

    /// Read `path` and work out where its page goes in `output_dir`.
    pub fn load(path: &Path, output_dir: &Path) -> Result<Self, PipelineError> {
        let output_path = source_to_output_path(path, output_dir).ok_or_else(|| {
            PipelineError::stage(
                "read",
                format!("{} is not a markdown document", path.display()),
            )
        })?;
        let source = SourceDocument::read(path).map_err(|e| PipelineError::io(path, e))?;
        Ok(Self::new(source, output_path))
    }

    /// The page title: `metadata.title` if it is a string, else from the file name.
    pub fn title(&self) -> String {
        match self.metadata.get("title") {
            Some(Value::String(title)) => title.clone(),
            _ => self.source.fallback_title(),
        }
    }

    /// Page information exposed to templates as `page.*`.
    pub fn page_info(&self) -> PageInfo {
        PageInfo {
            title: self.title(),
            source: self.source.file_name(),
            url: self
                .output_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(path: &str, raw_text: &str) -> ProcessingDocument {
        ProcessingDocument::new(
            SourceDocument {
                path: PathBuf::from(path),
                raw_text: raw_text.to_string(),
            },
            PathBuf::from("output/getting-started.html"),
        )
    }

    #[test]
    fn test_new_starts_with_raw_text() {
        let doc = document("input/getting-started.md", "# Raw");
        assert_eq!(doc.content, "# Raw");
        assert!(doc.metadata.is_empty());
        assert!(doc.output_html.is_none());
    }

    #[test]
    fn test_title_fallback() {
        let doc = document("input/getting-started.md", "");
        assert_eq!(doc.title(), "Getting Started");
    }

    #[test]
    fn test_title_from_metadata() {
        let mut doc = document("input/getting-started.md", "");
        doc.metadata
            .insert("title".to_string(), Value::String("Welcome".to_string()));
        assert_eq!(doc.title(), "Welcome");

        // Non-string titles fall back to the file name
        doc.metadata
            .insert("title".to_string(), Value::Bool(true));
        assert_eq!(doc.title(), "Getting Started");
    }

    #[test]
    fn test_page_info() {
        let doc = document("input/getting-started.md", "");
        let info = doc.page_info();
        assert_eq!(info.source, "getting-started.md");
        assert_eq!(info.url, "getting-started.html");
    }

    #[test]
    fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.md");
        std::fs::write(&path, "# Hi").unwrap();

        let doc = ProcessingDocument::load(&path, Path::new("out")).unwrap();
        assert_eq!(doc.source.raw_text, "# Hi");
        assert_eq!(doc.output_path, PathBuf::from("out/hello.html"));
    }

    #[test]
    fn test_load_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.md");

        let err = ProcessingDocument::load(&path, Path::new("out")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
