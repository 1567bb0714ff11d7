//! # Sensor Stream Shared
//!
//! Data model shared by the sensor stream crates: document shapes, the
//! stream sources that feed them, the index schemas they are written into,
//! and the sensor documents themselves.

pub mod document;
pub mod errors;
pub mod schema;
pub mod shape;
pub mod source;
pub mod timestamp;

pub use document::{SensorDocument, SensorValues};
pub use errors::SchemaError;
pub use schema::{FieldType, IndexSchema, PARTICLE_INDEX_NAME, SCALAR_INDEX_NAME};
pub use shape::Shape;
pub use source::StreamSource;
pub use timestamp::TimestampMode;
