//! Dependency initialization and wiring for the simulator.

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::StreamerError;
use sensor_stream_pipeline::{IntervalPacer, Orchestrator, OrchestratorConfig};
use sensor_stream_repository::{InMemorySink, OpenSearchSink, SearchSink};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Initialize all dependencies from resolved settings.
    ///
    /// The cluster health check runs as part of provisioning, so building
    /// dependencies never touches the network.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(StreamerError)` - If the source list cannot be loaded or the
    ///   OpenSearch client cannot be built
    pub fn new(settings: &Settings) -> Result<Self, StreamerError> {
        let sources = settings.sources()?;

        info!(
            opensearch_url = %settings.sink.url,
            source_count = sources.len(),
            pacing_interval_ms = settings.pacing_interval.as_millis() as u64,
            timestamp_mode = ?settings.timestamp_mode,
            dry_run = settings.dry_run,
            "Initializing dependencies"
        );

        let sink: Arc<dyn SearchSink> = if settings.dry_run {
            info!("Dry run: streaming into an in-memory sink");
            Arc::new(InMemorySink::new())
        } else {
            Arc::new(OpenSearchSink::new(&settings.sink)?)
        };

        let pacer = IntervalPacer::new(settings.pacing_interval);

        let orchestrator = Orchestrator::with_config(
            sink,
            Arc::new(pacer),
            sources,
            OrchestratorConfig {
                timestamp_mode: settings.timestamp_mode,
                check_health: true,
            },
        );

        Ok(Self { orchestrator })
    }
}
