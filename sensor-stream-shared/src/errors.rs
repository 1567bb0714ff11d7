//! Error types for the shared data model.

use thiserror::Error;

/// Errors raised while interpreting configured names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The shape selector is neither `scalar` nor `particle`.
    #[error("Unknown shape: {0}")]
    UnknownShape(String),

    /// The timestamp mode is neither `wall_clock` nor `replay`.
    #[error("Unknown timestamp mode: {0}")]
    UnknownTimestampMode(String),
}

impl SchemaError {
    /// Create an unknown shape error.
    pub fn unknown_shape(name: impl Into<String>) -> Self {
        Self::UnknownShape(name.into())
    }

    /// Create an unknown timestamp mode error.
    pub fn unknown_timestamp_mode(name: impl Into<String>) -> Self {
        Self::UnknownTimestampMode(name.into())
    }
}
