//! Sensor document definition.
//!
//! This is the document written into the search index for every source row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shape::Shape;

/// Readings carried by a sensor document.
///
/// A document holds either a single scalar reading or the three particle
/// buckets, never both. Fields are flattened into the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValues {
    Scalar {
        val: f64,
    },
    Particle {
        val_0_1: f64,
        val_0_3: f64,
        val_0_5: f64,
    },
}

impl SensorValues {
    /// The shape these readings belong to.
    pub fn shape(&self) -> Shape {
        match self {
            SensorValues::Scalar { .. } => Shape::Scalar,
            SensorValues::Particle { .. } => Shape::Particle,
        }
    }

    /// The headline reading: `val` for scalar sensors, `val_0_1` for particle sensors.
    pub fn primary(&self) -> f64 {
        match self {
            SensorValues::Scalar { val } => *val,
            SensorValues::Particle { val_0_1, .. } => *val_0_1,
        }
    }
}

/// A sensor reading as indexed in the search engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDocument {
    pub id: String,
    pub sensor_id: String,
    pub zone_id: String,
    #[serde(with = "crate::timestamp::millis")]
    pub timestamp: DateTime<Utc>,
    pub sensor_type: String,
    pub unit: String,
    #[serde(flatten)]
    pub values: SensorValues,
}

impl SensorDocument {
    /// The shape of this document.
    pub fn shape(&self) -> Shape {
        self.values.shape()
    }
}
