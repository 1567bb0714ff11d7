//! Document shape selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SchemaError;

/// The document schema variant a source is mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Shape {
    /// One reading per row, stored in `val`.
    Scalar,
    /// Three particle-size buckets per row: `val_0_1`, `val_0_3`, `val_0_5`.
    Particle,
}

impl Shape {
    /// The selector as it appears in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Scalar => "scalar",
            Shape::Particle => "particle",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(Shape::Scalar),
            "particle" => Ok(Shape::Particle),
            _ => Err(SchemaError::unknown_shape(s)),
        }
    }
}

impl TryFrom<String> for Shape {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
