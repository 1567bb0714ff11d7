//! Document timestamps.
//!
//! Documents carry a UTC timestamp serialized as ISO-8601 with millisecond
//! precision and a `Z` suffix, e.g. `2024-05-01T12:00:00.123Z`.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::SchemaError;

/// Naive layouts accepted for source timestamps, interpreted as UTC.
const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Where a document's timestamp comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampMode {
    /// Stamp each document with the wall-clock time at emission.
    #[default]
    WallClock,
    /// Carry the source row's `timestamp` column through to the document.
    Replay,
}

impl TimestampMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampMode::WallClock => "wall_clock",
            TimestampMode::Replay => "replay",
        }
    }
}

impl fmt::Display for TimestampMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimestampMode {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wall_clock" | "wallclock" | "now" => Ok(TimestampMode::WallClock),
            "replay" => Ok(TimestampMode::Replay),
            _ => Err(SchemaError::unknown_timestamp_mode(s)),
        }
    }
}

/// Format a timestamp the way documents carry it.
pub fn format_millis(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a timestamp read from a source row.
///
/// Accepts RFC 3339 with any offset, or a naive date-time which is taken to
/// be UTC.
pub fn parse_source_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .map(|naive| naive.and_utc())
}

/// Serde adapter for millisecond `Z` timestamps.
pub mod millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_millis(timestamp))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_source_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}
