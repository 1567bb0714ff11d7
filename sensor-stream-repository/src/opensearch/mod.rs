//! OpenSearch implementation of the search sink.
//!
//! This module provides a concrete implementation of `SearchSink` using
//! OpenSearch as the backend.

mod client;
mod index_config;

pub use client::OpenSearchSink;
pub use index_config::{get_index_body, parse_mapping_response};
