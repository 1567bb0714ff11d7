//! Stream worker implementation.
//!
//! Reads one source in file order and writes each row to the sink as a
//! document, pausing after every submission.

use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::errors::SubmissionError;
use crate::pacer::Pacer;
use crate::processor::SensorProcessor;
use crate::source::{read_csv, RecordResult};
use crate::worker::report::{RecordOutcome, WorkerReport};
use sensor_stream_repository::SearchSink;
use sensor_stream_shared::{StreamSource, TimestampMode};

/// Streams the rows of one source into the sink.
///
/// The worker never fails as a whole: a missing source ends it early, bad
/// rows are skipped, rejected documents are logged. Everything is counted
/// in the returned [`WorkerReport`].
pub struct StreamWorker {
    source: StreamSource,
    sink: Arc<dyn SearchSink>,
    pacer: Arc<dyn Pacer>,
    processor: SensorProcessor,
}

impl StreamWorker {
    /// Create a new worker for a source.
    pub fn new(
        source: StreamSource,
        sink: Arc<dyn SearchSink>,
        pacer: Arc<dyn Pacer>,
        timestamp_mode: TimestampMode,
    ) -> Self {
        let processor = SensorProcessor::new(source.shape, timestamp_mode);
        Self {
            source,
            sink,
            pacer,
            processor,
        }
    }

    /// Run the worker on its own task.
    pub fn start(self) -> JoinHandle<WorkerReport> {
        tokio::spawn(self.run())
    }

    /// Stream the whole source.
    #[instrument(skip(self), fields(source = %self.source.path.display(), shape = %self.source.shape))]
    pub async fn run(self) -> WorkerReport {
        let mut report = WorkerReport::new(self.source.clone());

        let records = match read_csv(&self.source.path).await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Source unavailable, nothing streamed");
                report.terminal_error = Some(e);
                return report;
            }
        };

        info!(total = records.len(), "Streaming records");

        for record in records {
            let outcome = self.process_record(record).await;
            report.record(&outcome);

            if !matches!(outcome, RecordOutcome::Skipped(_)) {
                self.pacer.pause().await;
            }
        }

        info!(
            emitted = report.emitted,
            skipped = report.skipped,
            failed = report.failed,
            "Source exhausted"
        );
        report
    }

    /// Map and submit one record.
    async fn process_record(&self, record: RecordResult) -> RecordOutcome {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(row = e.row(), error = %e, "Skipping unreadable row");
                return RecordOutcome::Skipped(e);
            }
        };

        let document = match self.processor.process(&record, Utc::now()) {
            Ok(document) => document,
            Err(e) => {
                warn!(row = record.row(), error = %e, "Skipping row");
                return RecordOutcome::Skipped(e);
            }
        };

        let index_name = self.source.shape.index_name();
        match self.sink.index_document(index_name, &document).await {
            Ok(doc_id) => {
                info!(
                    row = record.row(),
                    sensor_id = %document.sensor_id,
                    value = document.values.primary(),
                    doc_id = %doc_id,
                    "Inserted document"
                );
                RecordOutcome::Emitted(doc_id)
            }
            Err(e) => {
                let err = SubmissionError::new(record.row(), index_name, e);
                error!(row = record.row(), error = %err, "Failed to insert document");
                RecordOutcome::Failed(err)
            }
        }
    }
}
