//! OpenSearch sink implementation.
//!
//! This module provides the concrete implementation of `SearchSink` using the
//! OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    cert::CertificateValidation,
    cluster::ClusterHealthParts,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{
        IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesGetMappingParts,
        IndicesRefreshParts,
    },
    CountParts, IndexParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::SinkConfig;
use crate::errors::SinkError;
use crate::interfaces::{FieldMapping, SearchSink};
use crate::opensearch::index_config::{get_index_body, parse_mapping_response};
use sensor_stream_shared::{IndexSchema, SensorDocument};

/// OpenSearch sink implementation.
///
/// The underlying client owns a pooled HTTP transport and can be shared by
/// every stream worker.
///
/// # Example
///
/// ```ignore
/// let config = SinkConfig::new("https://localhost:9200").with_credentials("admin", "secret");
/// let sink = OpenSearchSink::new(&config)?;
///
/// sink.create_index(&Shape::Scalar.schema()).await?;
/// let id = sink.index_document("sensor_data_stream", &document).await?;
/// ```
pub struct OpenSearchSink {
    client: OpenSearch,
}

impl OpenSearchSink {
    /// Create a new OpenSearch sink from connection settings.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchSink)` - A new sink instance
    /// * `Err(SinkError)` - If the URL is invalid or the transport cannot be built
    pub fn new(config: &SinkConfig) -> Result<Self, SinkError> {
        let parsed_url = Url::parse(&config.url).map_err(|e| SinkError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some(password) = &config.password {
            builder = builder.auth(Credentials::Basic(config.username.clone(), password.clone()));
        }
        if !config.verify_certs {
            builder = builder.cert_validation(CertificateValidation::None);
        }
        let transport = builder
            .build()
            .map_err(|e| SinkError::connection(e.to_string()))?;

        info!(
            url = %config.url,
            authenticated = config.password.is_some(),
            verify_certs = config.verify_certs,
            "Created OpenSearch client"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }
}

#[async_trait]
impl SearchSink for OpenSearchSink {
    async fn health_check(&self) -> Result<bool, SinkError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SinkError::connection(e.to_string()))?;

        let health: Value = response
            .json()
            .await
            .map_err(|e| SinkError::parse(e.to_string()))?;
        let status = health
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown");

        info!(status = %status, "OpenSearch cluster status");
        Ok(status == "green" || status == "yellow")
    }

    async fn index_exists(&self, name: &str) -> Result<bool, SinkError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[name]))
            .send()
            .await
            .map_err(|e| SinkError::index_lookup(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            status => Err(SinkError::index_lookup(format!(
                "Unexpected status {} checking index '{}'",
                status, name
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn delete_index(&self, name: &str) -> Result<(), SinkError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[name]))
            .send()
            .await
            .map_err(|e| SinkError::index_deletion(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete index request failed");
            return Err(SinkError::index_deletion(format!(
                "Delete of '{}' failed with status {}: {}",
                name, status, error_body
            )));
        }

        debug!(index = %name, "Index deleted");
        Ok(())
    }

    #[instrument(skip(self, schema), fields(index = %schema.name))]
    async fn create_index(&self, schema: &IndexSchema) -> Result<(), SinkError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&schema.name))
            .body(get_index_body(schema))
            .send()
            .await
            .map_err(|e| SinkError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Create index request failed");
            return Err(SinkError::index_creation(format!(
                "Create of '{}' failed with status {}: {}",
                schema.name, status, error_body
            )));
        }

        debug!(fields = schema.fields.len(), "Index created");
        Ok(())
    }

    async fn index_document(
        &self,
        index_name: &str,
        document: &SensorDocument,
    ) -> Result<String, SinkError> {
        let body = serde_json::to_value(document).map_err(|e| SinkError::serialization(e.to_string()))?;

        let response = self
            .client
            .index(IndexParts::Index(index_name))
            .body(body)
            .send()
            .await
            .map_err(|e| SinkError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SinkError::index(format!(
                "Index into '{}' failed with status {}: {}",
                index_name, status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SinkError::parse(e.to_string()))?;
        response_body
            .get("_id")
            .and_then(|id| id.as_str())
            .map(str::to_string)
            .ok_or_else(|| SinkError::parse("Index response has no _id"))
    }

    async fn get_mapping(&self, name: &str) -> Result<Option<FieldMapping>, SinkError> {
        let response = self
            .client
            .indices()
            .get_mapping(IndicesGetMappingParts::Index(&[name]))
            .send()
            .await
            .map_err(|e| SinkError::index_lookup(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SinkError::index_lookup(format!(
                "Get mapping of '{}' failed with status {}: {}",
                name, status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SinkError::parse(e.to_string()))?;
        parse_mapping_response(name, &body).map(Some)
    }

    async fn count_documents(&self, name: &str) -> Result<u64, SinkError> {
        // Documents become searchable only after a refresh.
        self.client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[name]))
            .send()
            .await
            .map_err(|e| SinkError::index_lookup(e.to_string()))?;

        let response = self
            .client
            .count(CountParts::Index(&[name]))
            .send()
            .await
            .map_err(|e| SinkError::index_lookup(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SinkError::index_lookup(format!(
                "Count of '{}' failed with status {}: {}",
                name, status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SinkError::parse(e.to_string()))?;
        body.get("count")
            .and_then(|c| c.as_u64())
            .ok_or_else(|| SinkError::parse("Count response has no count"))
    }
}
