//! Stream source lists.

use std::fs;
use std::path::Path;

use crate::StreamerError;
use sensor_stream_shared::{Shape, StreamSource};

/// Feeds streamed when no source file is configured, relative to the data directory.
const DEFAULT_FEEDS: [(&str, Shape); 10] = [
    ("sensor_data.csv", Shape::Scalar),
    ("temp2_meta.csv", Shape::Scalar),
    ("humi_meta.csv", Shape::Scalar),
    ("humi2_meta.csv", Shape::Scalar),
    ("lpm1_meta.csv", Shape::Particle),
    ("lpm2_meta.csv", Shape::Particle),
    ("wd1_meta.csv", Shape::Scalar),
    ("wd2_meta.csv", Shape::Scalar),
    ("esd1_meta.csv", Shape::Scalar),
    ("esd2_meta.csv", Shape::Scalar),
];

/// The built-in feed list under `data_dir`.
pub fn default_sources(data_dir: &Path) -> Vec<StreamSource> {
    DEFAULT_FEEDS
        .iter()
        .map(|(file, shape)| StreamSource::new(data_dir.join(file), *shape))
        .collect()
}

/// Load a JSON array of `{"path": ..., "shape": "scalar" | "particle"}` entries.
pub fn load_sources_file(path: &Path) -> Result<Vec<StreamSource>, StreamerError> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        StreamerError::config(format!(
            "Invalid sources file '{}': {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_sources() {
        let sources = default_sources(Path::new("./data"));

        assert_eq!(sources.len(), 10);
        assert_eq!(sources[0], StreamSource::scalar("./data/sensor_data.csv"));
        let particle: Vec<_> = sources
            .iter()
            .filter(|s| s.shape == Shape::Particle)
            .map(|s| s.path.clone())
            .collect();
        assert_eq!(
            particle,
            vec![
                Path::new("./data/lpm1_meta.csv").to_path_buf(),
                Path::new("./data/lpm2_meta.csv").to_path_buf()
            ]
        );
    }

    #[test]
    fn test_load_sources_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"path": "feeds/a.csv", "shape": "scalar"}}, {{"path": "feeds/b.csv", "shape": "particle"}}]"#
        )
        .unwrap();

        let sources = load_sources_file(file.path()).unwrap();

        assert_eq!(
            sources,
            vec![
                StreamSource::scalar("feeds/a.csv"),
                StreamSource::particle("feeds/b.csv")
            ]
        );
    }

    #[test]
    fn test_load_sources_file_rejects_unknown_shape() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"path": "a.csv", "shape": "vector"}}]"#).unwrap();

        let result = load_sources_file(file.path());

        assert!(matches!(result, Err(StreamerError::ConfigError(_))));
    }

    #[test]
    fn test_load_missing_sources_file() {
        let result = load_sources_file(Path::new("/nonexistent/sources.json"));

        assert!(matches!(result, Err(StreamerError::IoError(_))));
    }
}
