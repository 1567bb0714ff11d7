//! Source module for the sensor stream pipeline.
//!
//! Reads the rows of a tabular feed in file order.

mod csv_source;

pub use csv_source::{read_csv, RecordResult, SourceRecord};
