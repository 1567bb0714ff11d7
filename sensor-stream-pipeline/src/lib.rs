//! # Sensor Stream Pipeline
//!
//! This crate replays tabular sensor feeds into the search index as if the
//! readings were arriving live.
//!
//! ## Architecture
//!
//! 1. **Provisioner**: Destructively recreates each target index
//! 2. **Source**: Reads the rows of one CSV feed in file order
//! 3. **Processor**: Maps rows to sensor documents
//! 4. **Worker**: Streams one feed into the sink, paced
//! 5. **Orchestrator**: Provisions once, then fans out one worker per feed

pub mod errors;
pub mod orchestrator;
pub mod pacer;
pub mod processor;
pub mod provisioner;
pub mod source;
pub mod worker;

pub use errors::{PipelineError, RowMappingError, SubmissionError};
pub use orchestrator::{Orchestrator, OrchestratorConfig, RunSummary};
pub use pacer::{IntervalPacer, NoPacer, Pacer};
pub use provisioner::IndexProvisioner;
pub use worker::{RecordOutcome, StreamWorker, WorkerReport};
