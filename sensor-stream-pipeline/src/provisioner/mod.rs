//! Provisioner module for the sensor stream pipeline.
//!
//! Destructively recreates target indices before streaming starts.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::errors::PipelineError;
use sensor_stream_repository::SearchSink;
use sensor_stream_shared::IndexSchema;

/// Recreates indices from their schemas.
///
/// After [`IndexProvisioner::ensure_clean`] succeeds the index exists, holds
/// no documents, and has exactly the schema's mapping. Any data previously in
/// the index is lost.
pub struct IndexProvisioner {
    sink: Arc<dyn SearchSink>,
}

impl IndexProvisioner {
    /// Create a new provisioner writing through the given sink.
    pub fn new(sink: Arc<dyn SearchSink>) -> Self {
        Self { sink }
    }

    /// Delete the index if it exists, create it from the schema, then check
    /// the mapping the sink reports matches the schema exactly.
    ///
    /// A failure between the delete and the create leaves the index missing;
    /// the error is returned and the run must not continue.
    #[instrument(skip(self, schema), fields(index = %schema.name))]
    pub async fn ensure_clean(&self, schema: &IndexSchema) -> Result<(), PipelineError> {
        let exists = self
            .sink
            .index_exists(&schema.name)
            .await
            .map_err(|e| PipelineError::provisioning(&schema.name, e.to_string()))?;

        if exists {
            info!(index = %schema.name, "Index already exists. Deleting and recreating");
            self.sink
                .delete_index(&schema.name)
                .await
                .map_err(|e| PipelineError::provisioning(&schema.name, e.to_string()))?;
        }

        self.sink
            .create_index(schema)
            .await
            .map_err(|e| PipelineError::provisioning(&schema.name, e.to_string()))?;

        let mapping = self
            .sink
            .get_mapping(&schema.name)
            .await
            .map_err(|e| PipelineError::provisioning(&schema.name, e.to_string()))?;
        match mapping {
            Some(fields) if fields == schema.fields => {}
            Some(fields) => {
                return Err(PipelineError::provisioning(
                    &schema.name,
                    format!("mapping mismatch: expected {:?}, found {:?}", schema.fields, fields),
                ));
            }
            None => {
                return Err(PipelineError::provisioning(
                    &schema.name,
                    "index missing after creation",
                ));
            }
        }

        info!(
            index = %schema.name,
            shards = schema.shard_count,
            fields = schema.fields.len(),
            "Index created"
        );
        Ok(())
    }
}
