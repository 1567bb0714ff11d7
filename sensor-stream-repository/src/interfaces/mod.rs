//! Interface definitions for the sink.
//!
//! This module defines the abstract `SearchSink` trait that allows for
//! dependency injection and swappable search backend implementations.

mod search_sink;

pub use search_sink::{FieldMapping, SearchSink};
