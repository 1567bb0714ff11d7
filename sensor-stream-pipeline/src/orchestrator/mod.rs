//! Orchestrator module for the sensor stream pipeline.
//!
//! Provisions every target index, then runs one worker per source.

mod summary;

pub use summary::RunSummary;

use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::errors::PipelineError;
use crate::pacer::Pacer;
use crate::provisioner::IndexProvisioner;
use crate::worker::{StreamWorker, WorkerReport};
use sensor_stream_repository::SearchSink;
use sensor_stream_shared::{IndexSchema, Shape, StreamSource, TimestampMode};

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Where document timestamps come from.
    pub timestamp_mode: TimestampMode,
    /// Refuse to provision when the sink reports itself unhealthy.
    pub check_health: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            timestamp_mode: TimestampMode::WallClock,
            check_health: true,
        }
    }
}

/// Orchestrator that coordinates provisioning and the stream workers.
///
/// The orchestrator:
/// - Checks the sink is usable
/// - Recreates each distinct target index exactly once
/// - Starts one worker per source and waits for all of them
/// - Collects the worker reports into a [`RunSummary`]
pub struct Orchestrator {
    sink: Arc<dyn SearchSink>,
    pacer: Arc<dyn Pacer>,
    sources: Vec<StreamSource>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create a new orchestrator with default configuration.
    pub fn new(sink: Arc<dyn SearchSink>, pacer: Arc<dyn Pacer>, sources: Vec<StreamSource>) -> Self {
        Self::with_config(sink, pacer, sources, OrchestratorConfig::default())
    }

    /// Create a new orchestrator with custom configuration.
    pub fn with_config(
        sink: Arc<dyn SearchSink>,
        pacer: Arc<dyn Pacer>,
        sources: Vec<StreamSource>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            sink,
            pacer,
            sources,
            config,
        }
    }

    /// Distinct schemas referenced by the sources, in first-appearance order.
    pub fn schemas(&self) -> Vec<IndexSchema> {
        let mut shapes: Vec<Shape> = Vec::new();
        for source in &self.sources {
            if !shapes.contains(&source.shape) {
                shapes.push(source.shape);
            }
        }
        shapes.iter().map(Shape::schema).collect()
    }

    /// Check the sink and recreate every target index.
    #[instrument(skip(self))]
    pub async fn provision(&self) -> Result<(), PipelineError> {
        if self.config.check_health {
            let healthy = self
                .sink
                .health_check()
                .await
                .map_err(|e| PipelineError::provisioning("cluster", e.to_string()))?;
            if !healthy {
                return Err(PipelineError::provisioning("cluster", "cluster is unhealthy"));
            }
        }

        let provisioner = IndexProvisioner::new(self.sink.clone());
        for schema in self.schemas() {
            provisioner.ensure_clean(&schema).await?;
        }
        Ok(())
    }

    /// Run the orchestrator.
    ///
    /// Provisioning failures abort the run before any worker starts. Once
    /// workers are running, nothing a single worker encounters stops the
    /// others; every outcome ends up in the summary.
    #[instrument(skip(self), fields(sources = self.sources.len()))]
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        info!(timestamp_mode = %self.config.timestamp_mode, "Starting sensor stream orchestrator");

        self.provision().await?;

        let workers = self.sources.iter().cloned().map(|source| {
            let handle = StreamWorker::new(
                source.clone(),
                self.sink.clone(),
                self.pacer.clone(),
                self.config.timestamp_mode,
            )
            .start();
            async move {
                match handle.await {
                    Ok(report) => report,
                    Err(e) => {
                        error!(source = %source, error = %e, "Worker task ended abnormally");
                        WorkerReport::terminated(source, PipelineError::worker(e.to_string()))
                    }
                }
            }
        });
        let summary = RunSummary::new(join_all(workers).await);

        info!(
            emitted = summary.emitted(),
            skipped = summary.skipped(),
            failed = summary.failed(),
            terminated = summary.terminated(),
            "All sensor streams complete"
        );
        Ok(summary)
    }
}
