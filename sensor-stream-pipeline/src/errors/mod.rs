//! Error types for the sensor stream pipeline.
//!
//! Only [`PipelineError::Provisioning`] halts a run. Source, row and
//! submission errors stay inside the worker that hit them.

use std::path::{Path, PathBuf};

use sensor_stream_repository::SinkError;
use thiserror::Error;

/// Errors that can occur in the sensor stream pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// An index could not be recreated, or the sink is not usable.
    #[error("Provisioning error for '{target}': {reason}")]
    Provisioning { target: String, reason: String },

    /// A configured source could not be opened.
    #[error("Source unavailable '{}': {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },

    /// A row could not be mapped to a document.
    #[error(transparent)]
    RowMapping(#[from] RowMappingError),

    /// The sink did not accept a document.
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// A worker task ended abnormally.
    #[error("Worker error: {0}")]
    WorkerError(String),
}

impl PipelineError {
    /// Create a provisioning error.
    pub fn provisioning(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Provisioning {
            target: target.into(),
            reason: reason.into(),
        }
    }

    /// Create a source unavailable error.
    pub fn source_unavailable(path: &Path, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a worker error.
    pub fn worker(msg: impl Into<String>) -> Self {
        Self::WorkerError(msg.into())
    }
}

/// A source row that cannot become a document.
///
/// `row` is the 0-based position of the data row in the source, not
/// counting the header.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowMappingError {
    #[error("row {row}: missing required column '{column}'")]
    MissingColumn { row: usize, column: String },

    #[error("row {row}: column '{column}' value '{value}' is not a finite number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}: value '{value}' is not a recognised timestamp")]
    InvalidTimestamp { row: usize, value: String },

    #[error("row {row}: malformed record: {reason}")]
    Malformed { row: usize, reason: String },
}

impl RowMappingError {
    /// Row position the error refers to.
    pub fn row(&self) -> usize {
        match self {
            RowMappingError::MissingColumn { row, .. }
            | RowMappingError::InvalidNumber { row, .. }
            | RowMappingError::InvalidTimestamp { row, .. }
            | RowMappingError::Malformed { row, .. } => *row,
        }
    }

    pub fn missing_column(row: usize, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            row,
            column: column.into(),
        }
    }

    pub fn invalid_number(row: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            row,
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn invalid_timestamp(row: usize, value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            row,
            value: value.into(),
        }
    }

    pub fn malformed(row: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            row,
            reason: reason.into(),
        }
    }
}

/// A document the sink did not accept.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("row {row}: submission to '{index}' failed: {source}")]
pub struct SubmissionError {
    pub row: usize,
    pub index: String,
    #[source]
    pub source: SinkError,
}

impl SubmissionError {
    pub fn new(row: usize, index: impl Into<String>, source: SinkError) -> Self {
        Self {
            row,
            index: index.into(),
            source,
        }
    }
}
