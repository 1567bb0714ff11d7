//! Processor module for the sensor stream pipeline.
//!
//! Transforms source rows into sensor documents.

mod sensor_processor;

pub use sensor_processor::SensorProcessor;
