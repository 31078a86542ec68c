use std::path::{Path, PathBuf};

use super::paths::is_markdown;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("input directory does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("input path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {}: {source}", .path.display())]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },
}

// =============================================================================
// Discovery
// =============================================================================

/// Find the markdown documents directly inside `input_dir`.
///
/// Subdirectories are not descended into. The result is sorted by path so
/// that logs and reports come out in a stable order; nothing downstream
/// depends on that order.
pub fn discover_documents(input_dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    if !input_dir.exists() {
        return Err(SourceError::PathNotFound(input_dir.to_path_buf()));
    }
    if !input_dir.is_dir() {
        return Err(SourceError::NotADirectory(input_dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(input_dir).map_err(|e| SourceError::ReadDir {
        path: input_dir.to_path_buf(),
        source: e,
    })?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SourceError::ReadEntry {
            path: input_dir.to_path_buf(),
            source: e,
        })?;

        if !is_markdown(&entry.file_name()) {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            tracing::debug!(path = %path.display(), "skipping directory with markdown extension");
            continue;
        }

        documents.push(path);
    }

    documents.sort();
    tracing::debug!(
        input = %input_dir.display(),
        count = documents.len(),
        "discovered documents"
    );

    Ok(documents)
}
