//! CSV source reader.
//!
//! A feed is a CSV file with a header row. Every data row becomes a
//! [`SourceRecord`] keyed by column name; rows the reader cannot decode are
//! surfaced as [`RowMappingError::Malformed`] in their position so the worker
//! can skip them without losing its place.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{PipelineError, RowMappingError};

/// One raw row read from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    row: usize,
    fields: HashMap<String, String>,
}

/// A decoded row, or the reason it could not be decoded.
pub type RecordResult = Result<SourceRecord, RowMappingError>;

impl SourceRecord {
    /// Create a record from column/value pairs.
    pub fn new<K, V>(row: usize, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            row,
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn from_csv(row: usize, headers: &StringRecord, record: &StringRecord) -> Self {
        Self::new(row, headers.iter().zip(record.iter()))
    }

    /// 0-based position of the row in the source, excluding the header.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Raw value of a column, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

/// Read every row of a CSV source, in file order.
///
/// The file is parsed on the blocking thread pool.
///
/// # Returns
///
/// * `Ok(Vec<RecordResult>)` - One entry per data row
/// * `Err(PipelineError::SourceUnavailable)` - If the file cannot be opened or has no readable header
pub async fn read_csv(path: &Path) -> Result<Vec<RecordResult>, PipelineError> {
    let owned: PathBuf = path.to_path_buf();
    tokio::task::spawn_blocking(move || read_csv_blocking(&owned))
        .await
        .map_err(|e| PipelineError::worker(format!("CSV reader task failed: {}", e)))?
}

fn read_csv_blocking(path: &Path) -> Result<Vec<RecordResult>, PipelineError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|e| PipelineError::source_unavailable(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| PipelineError::source_unavailable(path, e.to_string()))?
        .clone();

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        match result {
            Ok(record) => records.push(Ok(SourceRecord::from_csv(row, &headers, &record))),
            Err(e) if e.is_io_error() => {
                // The reader cannot make progress past an I/O error.
                records.push(Err(RowMappingError::malformed(row, e.to_string())));
                break;
            }
            Err(e) => records.push(Err(RowMappingError::malformed(row, e.to_string()))),
        }
    }

    debug!(source = %path.display(), rows = records.len(), "Read CSV source");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_reads_rows_in_file_order() {
        let file = csv_file(
            "id,sensor_id,zone_id,sensor_type,unit,val\n\
             3,T-1,Z1,temperature,C,20.5\n\
             1,T-1,Z1,temperature,C,21.0\n\
             2,T-1,Z1,temperature,C,19.5\n",
        );

        let records = read_csv(file.path()).await.unwrap();

        let ids: Vec<&str> = records
            .iter()
            .map(|r| r.as_ref().unwrap().get("id").unwrap())
            .collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert_eq!(records[2].as_ref().unwrap().row(), 2);
    }

    #[tokio::test]
    async fn test_header_whitespace_is_trimmed() {
        let file = csv_file(" id , val \n7,1.5\n");

        let records = read_csv(file.path()).await.unwrap();

        let record = records[0].as_ref().unwrap();
        assert_eq!(record.get("id"), Some("7"));
        assert_eq!(record.get("val"), Some("1.5"));
    }

    #[tokio::test]
    async fn test_ragged_row_is_reported_in_place() {
        let file = csv_file("id,val\n1,1.0\n2\n3,3.0\n");

        let records = read_csv(file.path()).await.unwrap();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(matches!(
            records[1],
            Err(RowMappingError::Malformed { row: 1, .. })
        ));
        assert_eq!(records[2].as_ref().unwrap().get("id"), Some("3"));
    }

    #[tokio::test]
    async fn test_missing_file_is_source_unavailable() {
        let result = read_csv(Path::new("/nonexistent/sensor_data.csv")).await;

        assert!(matches!(result, Err(PipelineError::SourceUnavailable { .. })));
    }

    #[tokio::test]
    async fn test_header_only_file_has_no_rows() {
        let file = csv_file("id,sensor_id,zone_id,sensor_type,unit,val\n");

        let records = read_csv(file.path()).await.unwrap();

        assert!(records.is_empty());
    }
}
