//! Stream source configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::shape::Shape;

/// A tabular source file paired with the shape its rows are mapped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSource {
    /// Path to the CSV file.
    pub path: PathBuf,
    /// Shape every row of the file is mapped to.
    pub shape: Shape,
}

impl StreamSource {
    /// Create a new stream source.
    pub fn new(path: impl Into<PathBuf>, shape: Shape) -> Self {
        Self {
            path: path.into(),
            shape,
        }
    }

    /// Create a scalar source.
    pub fn scalar(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Shape::Scalar)
    }

    /// Create a particle source.
    pub fn particle(path: impl Into<PathBuf>) -> Self {
        Self::new(path, Shape::Particle)
    }
}

impl fmt::Display for StreamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path.display(), self.shape)
    }
}
