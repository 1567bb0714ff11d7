//! # Sensor Stream
//!
//! Main library for the sensor stream simulator.
//!
//! This crate provides the configuration and dependency wiring for replaying
//! CSV sensor feeds into OpenSearch.

pub mod config;

pub use config::{Dependencies, LogFormat, Settings};

use thiserror::Error;

/// Errors that can occur during simulator initialization or execution.
#[derive(Error, Debug)]
pub enum StreamerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] sensor_stream_pipeline::PipelineError),

    /// Sink error.
    #[error("Sink error: {0}")]
    SinkError(#[from] sensor_stream_repository::SinkError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StreamerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
