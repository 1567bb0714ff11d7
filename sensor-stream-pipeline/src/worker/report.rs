//! Per-record outcomes and per-worker reports.

use crate::errors::{PipelineError, RowMappingError, SubmissionError};
use sensor_stream_shared::StreamSource;

/// What happened to one source row.
#[derive(Debug)]
pub enum RecordOutcome {
    /// Indexed; carries the id the sink assigned.
    Emitted(String),
    /// Not mapped to a document; nothing was submitted.
    Skipped(RowMappingError),
    /// Mapped, but the sink did not accept it.
    Failed(SubmissionError),
}

/// Summary of one worker's run.
#[derive(Debug)]
pub struct WorkerReport {
    /// The source the worker streamed.
    pub source: StreamSource,
    /// Rows read from the source, including skipped ones.
    pub rows_read: usize,
    /// Documents the sink accepted.
    pub emitted: usize,
    /// Rows that could not be mapped.
    pub skipped: usize,
    /// Documents the sink rejected.
    pub failed: usize,
    /// Set when the worker stopped before reading its source.
    pub terminal_error: Option<PipelineError>,
}

impl WorkerReport {
    /// Create an empty report for a source.
    pub fn new(source: StreamSource) -> Self {
        Self {
            source,
            rows_read: 0,
            emitted: 0,
            skipped: 0,
            failed: 0,
            terminal_error: None,
        }
    }

    /// Create a report for a worker that ended with an error.
    pub fn terminated(source: StreamSource, error: PipelineError) -> Self {
        Self {
            terminal_error: Some(error),
            ..Self::new(source)
        }
    }

    /// Count one record outcome.
    pub fn record(&mut self, outcome: &RecordOutcome) {
        self.rows_read += 1;
        match outcome {
            RecordOutcome::Emitted(_) => self.emitted += 1,
            RecordOutcome::Skipped(_) => self.skipped += 1,
            RecordOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// True if the worker read its source and every row was emitted.
    pub fn is_clean(&self) -> bool {
        self.terminal_error.is_none() && self.skipped == 0 && self.failed == 0
    }
}
