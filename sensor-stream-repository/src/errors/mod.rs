//! Error types for the sensor stream repository.

mod sink_error;

pub use sink_error::SinkError;
