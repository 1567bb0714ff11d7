//! Worker module for the sensor stream pipeline.
//!
//! One worker streams one source into the sink.

mod report;
mod stream_worker;

pub use report::{RecordOutcome, WorkerReport};
pub use stream_worker::StreamWorker;
