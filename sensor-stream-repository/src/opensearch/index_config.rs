//! OpenSearch index settings and mappings.
//!
//! This module renders index schemas into create-index request bodies and
//! reads mappings back out of get-mapping responses.

use serde_json::{json, Map, Value};

use crate::errors::SinkError;
use crate::interfaces::FieldMapping;
use sensor_stream_shared::{FieldType, IndexSchema};

/// Get the create-index body for a schema.
///
/// The body pins the primary shard count and declares every field
/// explicitly:
///
/// ```json
/// {
///   "settings": { "index": { "number_of_shards": 1 } },
///   "mappings": { "properties": { "val": { "type": "float" } } }
/// }
/// ```
pub fn get_index_body(schema: &IndexSchema) -> Value {
    let properties: Map<String, Value> = schema
        .fields
        .iter()
        .map(|(name, field_type)| (name.clone(), json!({ "type": field_type.as_str() })))
        .collect();

    json!({
        "settings": {
            "index": {
                "number_of_shards": schema.shard_count
            }
        },
        "mappings": {
            "properties": properties
        }
    })
}

/// Extract the field mapping of `index_name` from a get-mapping response.
///
/// The response has the layout `{ "<index>": { "mappings": { "properties": { ... } } } }`.
/// Fields whose type is not one the sensor mappings use are reported as
/// parse errors.
pub fn parse_mapping_response(index_name: &str, response: &Value) -> Result<FieldMapping, SinkError> {
    let properties = response
        .get(index_name)
        .and_then(|index| index.get("mappings"))
        .and_then(|mappings| mappings.get("properties"))
        .and_then(|properties| properties.as_object());

    let Some(properties) = properties else {
        // An index created without any field has no properties key.
        return Ok(FieldMapping::new());
    };

    properties
        .iter()
        .map(|(name, property)| {
            let type_name = property
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| SinkError::parse(format!("Field '{}' has no type", name)))?;
            let field_type = FieldType::from_mapping_type(type_name).ok_or_else(|| {
                SinkError::parse(format!("Field '{}' has unsupported type '{}'", name, type_name))
            })?;
            Ok((name.clone(), field_type))
        })
        .collect()
}
