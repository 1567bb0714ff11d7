//! Index schemas and the shape registry.
//!
//! Every shape maps to exactly one index with a fixed field-type mapping.
//! Identifiers and categoricals are `keyword`, the emission timestamp is
//! `date`, and readings are `float`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::shape::Shape;

/// Index receiving scalar sensor documents.
pub const SCALAR_INDEX_NAME: &str = "sensor_data_stream";

/// Index receiving particle sensor documents.
pub const PARTICLE_INDEX_NAME: &str = "particle_sensor_data_stream";

/// Primary shard count for every provisioned index.
pub const DEFAULT_SHARD_COUNT: u32 = 1;

/// Identifier and categorical columns common to both shapes.
pub const IDENTIFIER_COLUMNS: [&str; 5] = ["id", "sensor_id", "zone_id", "sensor_type", "unit"];

/// Name of the generated timestamp field.
pub const TIMESTAMP_FIELD: &str = "timestamp";

const SCALAR_VALUE_COLUMNS: [&str; 1] = ["val"];
const PARTICLE_VALUE_COLUMNS: [&str; 3] = ["val_0_1", "val_0_3", "val_0_5"];

/// Field types supported by the sensor mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Keyword,
    Date,
    Float,
}

impl FieldType {
    /// The mapping type name understood by the search engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Keyword => "keyword",
            FieldType::Date => "date",
            FieldType::Float => "float",
        }
    }

    /// Parse a mapping type name reported by the search engine.
    pub fn from_mapping_type(name: &str) -> Option<Self> {
        match name {
            "keyword" => Some(FieldType::Keyword),
            "date" => Some(FieldType::Date),
            "float" => Some(FieldType::Float),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named index with its shard count and explicit field mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSchema {
    /// Index name.
    pub name: String,
    /// Number of primary shards.
    pub shard_count: u32,
    /// Field name to field type.
    pub fields: BTreeMap<String, FieldType>,
}

impl IndexSchema {
    /// Create a schema with the default shard count.
    pub fn new(name: impl Into<String>, fields: BTreeMap<String, FieldType>) -> Self {
        Self {
            name: name.into(),
            shard_count: DEFAULT_SHARD_COUNT,
            fields,
        }
    }
}

impl Shape {
    /// Index that documents of this shape are written into.
    pub fn index_name(&self) -> &'static str {
        match self {
            Shape::Scalar => SCALAR_INDEX_NAME,
            Shape::Particle => PARTICLE_INDEX_NAME,
        }
    }

    /// Numeric columns carried by this shape.
    pub fn value_columns(&self) -> &'static [&'static str] {
        match self {
            Shape::Scalar => &SCALAR_VALUE_COLUMNS,
            Shape::Particle => &PARTICLE_VALUE_COLUMNS,
        }
    }

    /// Columns a source row must provide to be mapped to this shape.
    pub fn required_columns(&self) -> Vec<&'static str> {
        IDENTIFIER_COLUMNS
            .iter()
            .chain(self.value_columns())
            .copied()
            .collect()
    }

    /// The index schema for this shape.
    pub fn schema(&self) -> IndexSchema {
        let mut fields: BTreeMap<String, FieldType> = IDENTIFIER_COLUMNS
            .iter()
            .map(|column| (column.to_string(), FieldType::Keyword))
            .collect();
        fields.insert(TIMESTAMP_FIELD.to_string(), FieldType::Date);
        for column in self.value_columns() {
            fields.insert(column.to_string(), FieldType::Float);
        }

        IndexSchema::new(self.index_name(), fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_schema() {
        let schema = Shape::Scalar.schema();

        assert_eq!(schema.name, "sensor_data_stream");
        assert_eq!(schema.shard_count, 1);
        assert_eq!(schema.fields.len(), 7);
        assert_eq!(schema.fields["id"], FieldType::Keyword);
        assert_eq!(schema.fields["sensor_id"], FieldType::Keyword);
        assert_eq!(schema.fields["zone_id"], FieldType::Keyword);
        assert_eq!(schema.fields["sensor_type"], FieldType::Keyword);
        assert_eq!(schema.fields["unit"], FieldType::Keyword);
        assert_eq!(schema.fields["timestamp"], FieldType::Date);
        assert_eq!(schema.fields["val"], FieldType::Float);
    }

    #[test]
    fn test_particle_schema_replaces_val() {
        let schema = Shape::Particle.schema();

        assert_eq!(schema.name, "particle_sensor_data_stream");
        assert_eq!(schema.fields.len(), 9);
        assert!(!schema.fields.contains_key("val"));
        for bucket in ["val_0_1", "val_0_3", "val_0_5"] {
            assert_eq!(schema.fields[bucket], FieldType::Float);
        }
    }

    #[test]
    fn test_required_columns() {
        assert_eq!(
            Shape::Scalar.required_columns(),
            vec!["id", "sensor_id", "zone_id", "sensor_type", "unit", "val"]
        );
        assert_eq!(
            Shape::Particle.required_columns(),
            vec![
                "id",
                "sensor_id",
                "zone_id",
                "sensor_type",
                "unit",
                "val_0_1",
                "val_0_3",
                "val_0_5"
            ]
        );
    }

    #[test]
    fn test_field_type_names_round_trip() {
        for field_type in [FieldType::Keyword, FieldType::Date, FieldType::Float] {
            assert_eq!(
                FieldType::from_mapping_type(field_type.as_str()),
                Some(field_type)
            );
        }
        assert_eq!(FieldType::from_mapping_type("text"), None);
    }
}
