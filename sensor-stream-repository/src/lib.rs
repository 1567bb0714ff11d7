//! # Sensor Stream Repository
//!
//! This crate provides the sink abstraction the streaming pipeline writes
//! through, along with a concrete implementation for OpenSearch and an
//! in-memory implementation for tests and dry runs.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod opensearch;

pub use config::SinkConfig;
pub use errors::SinkError;
pub use interfaces::SearchSink;
pub use memory::InMemorySink;
pub use opensearch::OpenSearchSink;
