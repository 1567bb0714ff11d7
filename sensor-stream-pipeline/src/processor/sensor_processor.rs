//! Sensor processor implementation.
//!
//! Maps a [`SourceRecord`] to a [`SensorDocument`] of the configured shape.

use chrono::{DateTime, Utc};

use crate::errors::RowMappingError;
use crate::source::SourceRecord;
use sensor_stream_shared::schema::TIMESTAMP_FIELD;
use sensor_stream_shared::timestamp::parse_source_timestamp;
use sensor_stream_shared::{SensorDocument, SensorValues, Shape, TimestampMode};

/// Processor that turns source rows into documents of one shape.
///
/// Identifier and categorical columns are carried as trimmed text; readings
/// are parsed as finite `f64`. A row with any missing or unparseable
/// required column produces no document at all.
#[derive(Debug, Clone, Copy)]
pub struct SensorProcessor {
    shape: Shape,
    timestamp_mode: TimestampMode,
}

impl SensorProcessor {
    /// Create a new processor.
    pub fn new(shape: Shape, timestamp_mode: TimestampMode) -> Self {
        Self {
            shape,
            timestamp_mode,
        }
    }

    /// Map one record.
    ///
    /// # Arguments
    ///
    /// * `record` - The raw source row
    /// * `emitted_at` - Emission time, used as the timestamp in wall-clock mode
    pub fn process(
        &self,
        record: &SourceRecord,
        emitted_at: DateTime<Utc>,
    ) -> Result<SensorDocument, RowMappingError> {
        for column in self.shape.required_columns() {
            text(record, column)?;
        }

        let id = text(record, "id")?;
        let sensor_id = text(record, "sensor_id")?;
        let zone_id = text(record, "zone_id")?;
        let sensor_type = text(record, "sensor_type")?;
        let unit = text(record, "unit")?;

        let values = match self.shape {
            Shape::Scalar => SensorValues::Scalar {
                val: number(record, "val")?,
            },
            Shape::Particle => SensorValues::Particle {
                val_0_1: number(record, "val_0_1")?,
                val_0_3: number(record, "val_0_3")?,
                val_0_5: number(record, "val_0_5")?,
            },
        };

        let timestamp = match self.timestamp_mode {
            TimestampMode::WallClock => emitted_at,
            TimestampMode::Replay => {
                let raw = text(record, TIMESTAMP_FIELD)?;
                parse_source_timestamp(&raw)
                    .ok_or_else(|| RowMappingError::invalid_timestamp(record.row(), raw))?
            }
        };

        Ok(SensorDocument {
            id,
            sensor_id,
            zone_id,
            timestamp,
            sensor_type,
            unit,
            values,
        })
    }
}

fn text(record: &SourceRecord, column: &str) -> Result<String, RowMappingError> {
    record
        .get(column)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| RowMappingError::missing_column(record.row(), column))
}

fn number(record: &SourceRecord, column: &str) -> Result<f64, RowMappingError> {
    let raw = text(record, column)?;
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RowMappingError::invalid_number(record.row(), column, raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scalar_record(val: &str) -> SourceRecord {
        SourceRecord::new(
            0,
            [
                ("id", "1"),
                ("sensor_id", "TEMP-01"),
                ("zone_id", "Z1"),
                ("sensor_type", "temperature"),
                ("unit", "C"),
                ("val", val),
            ],
        )
    }

    fn particle_record(buckets: [&str; 3]) -> SourceRecord {
        SourceRecord::new(
            5,
            [
                ("id", "42"),
                ("sensor_id", "LPM-01"),
                ("zone_id", "Z3"),
                ("sensor_type", "particle"),
                ("unit", "count"),
                ("val_0_1", buckets[0]),
                ("val_0_3", buckets[1]),
                ("val_0_5", buckets[2]),
            ],
        )
    }

    #[test]
    fn test_scalar_value_is_parsed_as_float() {
        let processor = SensorProcessor::new(Shape::Scalar, TimestampMode::WallClock);
        let now = Utc::now();

        let doc = processor.process(&scalar_record("3.14"), now).unwrap();

        assert_eq!(doc.values, SensorValues::Scalar { val: 3.14 });
        assert_eq!(doc.timestamp, now);
        assert_eq!(doc.sensor_id, "TEMP-01");
    }

    #[test]
    fn test_timestamp_serializes_with_millis_and_z() {
        let processor = SensorProcessor::new(Shape::Scalar, TimestampMode::WallClock);

        let doc = processor.process(&scalar_record("3.14"), Utc::now()).unwrap();

        let body = serde_json::to_value(&doc).unwrap();
        let timestamp = body["timestamp"].as_str().unwrap();
        let bytes = timestamp.as_bytes();
        assert_eq!(timestamp.len(), 24);
        assert_eq!(bytes[4], b'-');
        assert_eq!(bytes[7], b'-');
        assert_eq!(bytes[10], b'T');
        assert_eq!(bytes[13], b':');
        assert_eq!(bytes[16], b':');
        assert_eq!(bytes[19], b'.');
        assert_eq!(bytes[23], b'Z');
        assert!(timestamp
            .char_indices()
            .filter(|(i, _)| ![4, 7, 10, 13, 16, 19, 23].contains(i))
            .all(|(_, c)| c.is_ascii_digit()));
    }

    #[test]
    fn test_identifiers_are_trimmed_text() {
        let processor = SensorProcessor::new(Shape::Scalar, TimestampMode::WallClock);
        let record = SourceRecord::new(
            0,
            [
                ("id", " 0017 "),
                ("sensor_id", "TEMP-01"),
                ("zone_id", "3"),
                ("sensor_type", "temperature"),
                ("unit", "C"),
                ("val", " 21 "),
            ],
        );

        let doc = processor.process(&record, Utc::now()).unwrap();

        assert_eq!(doc.id, "0017");
        assert_eq!(doc.zone_id, "3");
        assert_eq!(doc.values.primary(), 21.0);
    }

    #[test]
    fn test_particle_buckets_are_parsed() {
        let processor = SensorProcessor::new(Shape::Particle, TimestampMode::WallClock);

        let doc = processor
            .process(&particle_record(["120", "35.5", "2"]), Utc::now())
            .unwrap();

        assert_eq!(
            doc.values,
            SensorValues::Particle {
                val_0_1: 120.0,
                val_0_3: 35.5,
                val_0_5: 2.0
            }
        );
    }

    #[test]
    fn test_one_bad_bucket_rejects_whole_particle_record() {
        let processor = SensorProcessor::new(Shape::Particle, TimestampMode::WallClock);

        let result = processor.process(&particle_record(["120", "35.5", "n/a"]), Utc::now());

        assert_eq!(
            result,
            Err(RowMappingError::invalid_number(5, "val_0_5", "n/a"))
        );
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let processor = SensorProcessor::new(Shape::Scalar, TimestampMode::WallClock);

        let result = processor.process(&scalar_record("NaN"), Utc::now());

        assert!(matches!(result, Err(RowMappingError::InvalidNumber { .. })));
    }

    #[test]
    fn test_missing_column() {
        let processor = SensorProcessor::new(Shape::Scalar, TimestampMode::WallClock);
        let record = SourceRecord::new(3, [("id", "1"), ("sensor_id", "TEMP-01")]);

        let result = processor.process(&record, Utc::now());

        assert_eq!(result, Err(RowMappingError::missing_column(3, "zone_id")));
    }

    #[test]
    fn test_missing_any_required_column_skips_row() {
        for shape in [Shape::Scalar, Shape::Particle] {
            let processor = SensorProcessor::new(shape, TimestampMode::WallClock);
            let full = match shape {
                Shape::Scalar => scalar_record("1"),
                Shape::Particle => particle_record(["1", "2", "3"]),
            };

            for column in shape.required_columns() {
                let record = SourceRecord::new(
                    full.row(),
                    shape
                        .required_columns()
                        .into_iter()
                        .filter(|c| *c != column)
                        .filter_map(|c| full.get(c).map(|v| (c, v.to_string()))),
                );

                let result = processor.process(&record, Utc::now());

                assert_eq!(
                    result,
                    Err(RowMappingError::missing_column(full.row(), column)),
                    "{} row without '{}'",
                    shape,
                    column
                );
            }
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let processor = SensorProcessor::new(Shape::Scalar, TimestampMode::WallClock);

        let result = processor.process(&scalar_record(""), Utc::now());

        assert_eq!(result, Err(RowMappingError::missing_column(0, "val")));
    }

    #[test]
    fn test_scalar_shape_ignores_particle_columns() {
        let processor = SensorProcessor::new(Shape::Scalar, TimestampMode::WallClock);
        let record = SourceRecord::new(
            0,
            [
                ("id", "1"),
                ("sensor_id", "TEMP-01"),
                ("zone_id", "Z1"),
                ("sensor_type", "temperature"),
                ("unit", "C"),
                ("val", "1"),
                ("val_0_1", "99"),
            ],
        );

        let doc = processor.process(&record, Utc::now()).unwrap();

        let body = serde_json::to_value(&doc).unwrap();
        assert!(body.get("val_0_1").is_none());
    }

    #[test]
    fn test_replay_mode_uses_source_timestamp() {
        let processor = SensorProcessor::new(Shape::Scalar, TimestampMode::Replay);
        let record = SourceRecord::new(
            0,
            [
                ("id", "1"),
                ("sensor_id", "TEMP-01"),
                ("zone_id", "Z1"),
                ("timestamp", "2024-03-01 08:30:00"),
                ("sensor_type", "temperature"),
                ("unit", "C"),
                ("val", "1"),
            ],
        );

        let doc = processor.process(&record, Utc::now()).unwrap();

        assert_eq!(
            doc.timestamp,
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_replay_mode_requires_timestamp() {
        let processor = SensorProcessor::new(Shape::Scalar, TimestampMode::Replay);

        let result = processor.process(&scalar_record("1"), Utc::now());

        assert_eq!(result, Err(RowMappingError::missing_column(0, "timestamp")));
    }

    #[test]
    fn test_wall_clock_mode_ignores_source_timestamp() {
        let processor = SensorProcessor::new(Shape::Scalar, TimestampMode::WallClock);
        let record = SourceRecord::new(
            0,
            [
                ("id", "1"),
                ("sensor_id", "TEMP-01"),
                ("zone_id", "Z1"),
                ("timestamp", "garbage"),
                ("sensor_type", "temperature"),
                ("unit", "C"),
                ("val", "1"),
            ],
        );
        let now = Utc::now();

        let doc = processor.process(&record, now).unwrap();

        assert_eq!(doc.timestamp, now);
    }
}
