//! Environment-driven settings for the simulator.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::config::sources::{default_sources, load_sources_file};
use crate::StreamerError;
use sensor_stream_repository::config::{DEFAULT_OPENSEARCH_URL, DEFAULT_OPENSEARCH_USERNAME};
use sensor_stream_repository::SinkConfig;
use sensor_stream_shared::{StreamSource, TimestampMode};

/// Default directory holding the built-in feeds.
const DEFAULT_DATA_DIR: &str = "./data";

/// Default pause between submissions, in milliseconds.
const DEFAULT_PACING_INTERVAL_MS: u64 = 1000;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = StreamerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(StreamerError::config(format!("Unknown log format: {}", other))),
        }
    }
}

/// Resolved simulator settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub sink: SinkConfig,
    pub sources_file: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub pacing_interval: Duration,
    pub timestamp_mode: TimestampMode,
    pub log_format: LogFormat,
    /// Stream into an in-memory sink instead of OpenSearch.
    pub dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sink: SinkConfig::default(),
            sources_file: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            pacing_interval: Duration::from_millis(DEFAULT_PACING_INTERVAL_MS),
            timestamp_mode: TimestampMode::default(),
            log_format: LogFormat::default(),
            dry_run: false,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: https://localhost:9200)
    /// - `OPENSEARCH_USERNAME`: Basic-auth user (default: admin)
    /// - `OPENSEARCH_PASSWORD`: Basic-auth password (default: unset, no auth)
    /// - `OPENSEARCH_VERIFY_CERTS`: Verify TLS certificates (default: false)
    /// - `STREAM_SOURCES_FILE`: JSON source list (default: built-in feeds)
    /// - `STREAM_DATA_DIR`: Directory of the built-in feeds (default: ./data)
    /// - `PACING_INTERVAL_MS`: Pause between submissions (default: 1000)
    /// - `TIMESTAMP_MODE`: `wall_clock` or `replay` (default: wall_clock)
    /// - `LOG_FORMAT`: `text` or `json` (default: text)
    /// - `STREAM_DRY_RUN`: Use the in-memory sink (default: false)
    pub fn from_env() -> Result<Self, StreamerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StreamerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = get("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());
        let username =
            get("OPENSEARCH_USERNAME").unwrap_or_else(|| DEFAULT_OPENSEARCH_USERNAME.to_string());
        let verify_certs = match get("OPENSEARCH_VERIFY_CERTS") {
            Some(raw) => parse_bool("OPENSEARCH_VERIFY_CERTS", &raw)?,
            None => false,
        };

        let mut sink = SinkConfig::new(url).with_verify_certs(verify_certs);
        sink.username = username;
        sink.password = get("OPENSEARCH_PASSWORD");

        let pacing_interval = match get("PACING_INTERVAL_MS") {
            Some(raw) => {
                let ms = raw.trim().parse::<u64>().map_err(|e| {
                    StreamerError::config(format!("Invalid PACING_INTERVAL_MS '{}': {}", raw, e))
                })?;
                Duration::from_millis(ms)
            }
            None => Duration::from_millis(DEFAULT_PACING_INTERVAL_MS),
        };

        let timestamp_mode = match get("TIMESTAMP_MODE") {
            Some(raw) => raw
                .parse::<TimestampMode>()
                .map_err(|e| StreamerError::config(e.to_string()))?,
            None => TimestampMode::default(),
        };

        let log_format = match get("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        let dry_run = match get("STREAM_DRY_RUN") {
            Some(raw) => parse_bool("STREAM_DRY_RUN", &raw)?,
            None => false,
        };

        Ok(Self {
            sink,
            sources_file: get("STREAM_SOURCES_FILE").map(PathBuf::from),
            data_dir: get("STREAM_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            pacing_interval,
            timestamp_mode,
            log_format,
            dry_run,
        })
    }

    /// The feeds to stream: the configured source file, or the built-in list.
    pub fn sources(&self) -> Result<Vec<StreamSource>, StreamerError> {
        match &self.sources_file {
            Some(path) => load_sources_file(path),
            None => Ok(default_sources(&self.data_dir)),
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, StreamerError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(StreamerError::config(format!(
            "Invalid {} '{}': expected true or false",
            key, raw
        ))),
    }
}
