//! Batch reports: the per-document outcomes of one pipeline run.

use std::path::{Path, PathBuf};

use super::PipelineError;

/// What happened to a single source document.
#[derive(Debug)]
pub enum DocumentOutcome {
    /// The page was rendered and written
    Written { source: PathBuf, output: PathBuf },
    /// Processing stopped at `stage`; nothing was written for this document
    Failed {
        source: PathBuf,
        stage: &'static str,
        error: PipelineError,
    },
}

impl DocumentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DocumentOutcome::Written { .. })
    }
}

/// Outcomes of every document processed in one run, one entry per source.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for one document.
    pub fn record(&mut self, outcome: DocumentOutcome) {
        self.outcomes.push(outcome);
    }

    /// Pages that were written, as `(source, output)` pairs.
    pub fn written(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            DocumentOutcome::Written { source, output } => {
                Some((source.as_path(), output.as_path()))
            }
            DocumentOutcome::Failed { .. } => None,
        })
    }

    /// Documents that were skipped, with the stage and error that stopped them.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &'static str, &PipelineError)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            DocumentOutcome::Failed {
                source,
                stage,
                error,
            } => Some((source.as_path(), *stage, error)),
            DocumentOutcome::Written { .. } => None,
        })
    }

    pub fn written_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.written_count()
    }

    /// Total number of documents processed.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
