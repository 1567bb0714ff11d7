//! In-memory sink.
//!
//! Keeps indices and documents in process memory. Used by tests and for dry
//! runs without a cluster. Faults can be injected to exercise the pipeline's
//! error paths.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::SinkError;
use crate::interfaces::{FieldMapping, SearchSink};
use sensor_stream_shared::{IndexSchema, SensorDocument};

#[derive(Debug)]
struct MemoryIndex {
    schema: IndexSchema,
    documents: Vec<(String, SensorDocument)>,
}

#[derive(Debug, Default)]
struct Inner {
    indices: HashMap<String, MemoryIndex>,
}

#[derive(Debug, Clone, Default)]
struct Faults {
    unhealthy: bool,
    fail_lookup: bool,
    fail_deletion: bool,
    fail_creation: bool,
    rejected_sensors: HashSet<String>,
}

/// Sink that stores everything in memory.
///
/// Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct InMemorySink {
    inner: Arc<RwLock<Inner>>,
    faults: Faults,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the cluster as unhealthy.
    pub fn unhealthy(mut self) -> Self {
        self.faults.unhealthy = true;
        self
    }

    /// Fail every index existence check.
    pub fn with_failing_index_lookup(mut self) -> Self {
        self.faults.fail_lookup = true;
        self
    }

    /// Fail every index deletion.
    pub fn with_failing_index_deletion(mut self) -> Self {
        self.faults.fail_deletion = true;
        self
    }

    /// Fail every index creation.
    pub fn with_failing_index_creation(mut self) -> Self {
        self.faults.fail_creation = true;
        self
    }

    /// Reject every document whose `sensor_id` matches.
    pub fn with_rejected_sensor(mut self, sensor_id: impl Into<String>) -> Self {
        self.faults.rejected_sensors.insert(sensor_id.into());
        self
    }

    /// Create an index and fill it with documents, bypassing fault injection.
    pub async fn seed_index(&self, schema: IndexSchema, documents: Vec<SensorDocument>) {
        let documents = documents
            .into_iter()
            .map(|doc| (Uuid::new_v4().to_string(), doc))
            .collect();
        let mut inner = self.inner.write().await;
        inner
            .indices
            .insert(schema.name.clone(), MemoryIndex { schema, documents });
    }

    /// Documents stored in an index, in the order they were written.
    pub async fn documents(&self, index_name: &str) -> Vec<SensorDocument> {
        let inner = self.inner.read().await;
        inner
            .indices
            .get(index_name)
            .map(|index| index.documents.iter().map(|(_, doc)| doc.clone()).collect())
            .unwrap_or_default()
    }

    /// Names of all existing indices, sorted.
    pub async fn index_names(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        let mut names: Vec<String> = inner.indices.keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl SearchSink for InMemorySink {
    async fn health_check(&self) -> Result<bool, SinkError> {
        Ok(!self.faults.unhealthy)
    }

    async fn index_exists(&self, name: &str) -> Result<bool, SinkError> {
        if self.faults.fail_lookup {
            return Err(SinkError::index_lookup(format!("lookup of [{}] failed", name)));
        }
        Ok(self.inner.read().await.indices.contains_key(name))
    }

    async fn delete_index(&self, name: &str) -> Result<(), SinkError> {
        if self.faults.fail_deletion {
            return Err(SinkError::index_deletion(format!("deletion of [{}] rejected", name)));
        }

        let mut inner = self.inner.write().await;
        match inner.indices.remove(name) {
            Some(_) => {
                debug!(index = %name, "Deleted in-memory index");
                Ok(())
            }
            None => Err(SinkError::index_deletion(format!("no such index [{}]", name))),
        }
    }

    async fn create_index(&self, schema: &IndexSchema) -> Result<(), SinkError> {
        if self.faults.fail_creation {
            return Err(SinkError::index_creation(format!(
                "creation of [{}] rejected",
                schema.name
            )));
        }

        let mut inner = self.inner.write().await;
        if inner.indices.contains_key(&schema.name) {
            return Err(SinkError::index_creation(format!(
                "resource_already_exists_exception: index [{}] already exists",
                schema.name
            )));
        }
        inner.indices.insert(
            schema.name.clone(),
            MemoryIndex {
                schema: schema.clone(),
                documents: Vec::new(),
            },
        );
        debug!(index = %schema.name, "Created in-memory index");
        Ok(())
    }

    async fn index_document(
        &self,
        index_name: &str,
        document: &SensorDocument,
    ) -> Result<String, SinkError> {
        if self.faults.rejected_sensors.contains(&document.sensor_id) {
            return Err(SinkError::index(format!(
                "document for sensor [{}] rejected",
                document.sensor_id
            )));
        }

        let mut inner = self.inner.write().await;
        // Like the real engine, missing indices are auto-created with a dynamic mapping.
        let index = inner
            .indices
            .entry(index_name.to_string())
            .or_insert_with(|| MemoryIndex {
                schema: IndexSchema::new(index_name, FieldMapping::new()),
                documents: Vec::new(),
            });
        let id = Uuid::new_v4().to_string();
        index.documents.push((id.clone(), document.clone()));
        Ok(id)
    }

    async fn get_mapping(&self, name: &str) -> Result<Option<FieldMapping>, SinkError> {
        let inner = self.inner.read().await;
        Ok(inner.indices.get(name).map(|index| index.schema.fields.clone()))
    }

    async fn count_documents(&self, name: &str) -> Result<u64, SinkError> {
        let inner = self.inner.read().await;
        inner
            .indices
            .get(name)
            .map(|index| index.documents.len() as u64)
            .ok_or_else(|| SinkError::index_lookup(format!("no such index [{}]", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sensor_stream_shared::{SensorValues, Shape};

    fn document(sensor_id: &str) -> SensorDocument {
        SensorDocument {
            id: "1".to_string(),
            sensor_id: sensor_id.to_string(),
            zone_id: "Z1".to_string(),
            timestamp: Utc::now(),
            sensor_type: "temperature".to_string(),
            unit: "C".to_string(),
            values: SensorValues::Scalar { val: 21.5 },
        }
    }

    #[tokio::test]
    async fn test_create_and_describe_index() {
        let sink = InMemorySink::new();
        let schema = Shape::Scalar.schema();

        sink.create_index(&schema).await.unwrap();

        assert!(sink.index_exists("sensor_data_stream").await.unwrap());
        assert_eq!(
            sink.get_mapping("sensor_data_stream").await.unwrap(),
            Some(schema.fields)
        );
        assert_eq!(sink.count_documents("sensor_data_stream").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_existing_index_fails() {
        let sink = InMemorySink::new();
        let schema = Shape::Scalar.schema();
        sink.create_index(&schema).await.unwrap();

        let result = sink.create_index(&schema).await;

        assert!(matches!(result, Err(SinkError::IndexCreationError(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_index_fails() {
        let sink = InMemorySink::new();

        let result = sink.delete_index("sensor_data_stream").await;

        assert!(matches!(result, Err(SinkError::IndexDeletionError(_))));
    }

    #[tokio::test]
    async fn test_index_document_assigns_unique_ids() {
        let sink = InMemorySink::new();
        sink.create_index(&Shape::Scalar.schema()).await.unwrap();

        let first = sink
            .index_document("sensor_data_stream", &document("TEMP-01"))
            .await
            .unwrap();
        let second = sink
            .index_document("sensor_data_stream", &document("TEMP-02"))
            .await
            .unwrap();

        assert_ne!(first, second);
        let stored = sink.documents("sensor_data_stream").await;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].sensor_id, "TEMP-01");
        assert_eq!(stored[1].sensor_id, "TEMP-02");
    }

    #[tokio::test]
    async fn test_rejected_sensor() {
        let sink = InMemorySink::new().with_rejected_sensor("TEMP-02");
        sink.create_index(&Shape::Scalar.schema()).await.unwrap();

        let result = sink
            .index_document("sensor_data_stream", &document("TEMP-02"))
            .await;

        assert!(matches!(result, Err(SinkError::IndexError(_))));
        assert_eq!(sink.count_documents("sensor_data_stream").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let sink = InMemorySink::new();
        let clone = sink.clone();

        clone.create_index(&Shape::Particle.schema()).await.unwrap();

        assert_eq!(sink.index_names().await, vec!["particle_sensor_data_stream"]);
    }

    #[tokio::test]
    async fn test_failing_lookup_and_deletion() {
        let sink = InMemorySink::new()
            .with_failing_index_lookup()
            .with_failing_index_deletion();
        sink.seed_index(Shape::Scalar.schema(), Vec::new()).await;

        assert!(matches!(
            sink.index_exists("sensor_data_stream").await,
            Err(SinkError::IndexLookupError(_))
        ));
        assert!(matches!(
            sink.delete_index("sensor_data_stream").await,
            Err(SinkError::IndexDeletionError(_))
        ));
        assert_eq!(sink.index_names().await, vec!["sensor_data_stream"]);
    }

    #[tokio::test]
    async fn test_unhealthy() {
        assert!(InMemorySink::new().health_check().await.unwrap());
        assert!(!InMemorySink::new().unhealthy().health_check().await.unwrap());
    }
}
