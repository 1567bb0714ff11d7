//! Search sink trait definition.
//!
//! This module defines the abstract interface for the search engine
//! operations the streaming pipeline consumes, allowing for different backend
//! implementations (OpenSearch, in-memory, etc.).

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::errors::SinkError;
use sensor_stream_shared::{FieldType, IndexSchema, SensorDocument};

/// Field name to field type, as reported by the search engine.
pub type FieldMapping = BTreeMap<String, FieldType>;

/// Abstract interface for the search engine the documents are written to.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. A single handle is shared by
/// every stream worker, so implementations must tolerate concurrent calls.
///
/// # Error Handling
///
/// All methods return `Result<T, SinkError>` for consistent error handling.
#[async_trait]
pub trait SearchSink: Send + Sync {
    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is reachable but unhealthy
    /// * `Err(SinkError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SinkError>;

    /// Check whether an index exists.
    async fn index_exists(&self, name: &str) -> Result<bool, SinkError>;

    /// Delete an index.
    ///
    /// Deleting an index that does not exist is an error; callers guard with
    /// [`SearchSink::index_exists`].
    async fn delete_index(&self, name: &str) -> Result<(), SinkError>;

    /// Create an index with the schema's shard count and explicit mapping.
    ///
    /// Creating an index that already exists is an error.
    async fn create_index(&self, schema: &IndexSchema) -> Result<(), SinkError>;

    /// Index a single document, letting the engine assign its id.
    ///
    /// # Arguments
    ///
    /// * `index_name` - The target index
    /// * `document` - The sensor document to index
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The id assigned to the document
    /// * `Err(SinkError)` - If the engine rejected or failed to store the document
    async fn index_document(
        &self,
        index_name: &str,
        document: &SensorDocument,
    ) -> Result<String, SinkError>;

    /// Fetch the field mapping of an index.
    ///
    /// Returns `Ok(None)` if the index does not exist.
    async fn get_mapping(&self, name: &str) -> Result<Option<FieldMapping>, SinkError>;

    /// Count the searchable documents in an index.
    async fn count_documents(&self, name: &str) -> Result<u64, SinkError>;
}
