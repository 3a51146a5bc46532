//! Editor configuration

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Line editor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Bytes the width probe accepts before giving up on the terminal
    pub probe_byte_limit: usize,
    /// Milliseconds the width probe waits for its reports (0 = no limit)
    pub probe_timeout_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            probe_byte_limit: 64,
            probe_timeout_ms: 2000,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON configuration; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn probe_timeout(&self) -> Option<Duration> {
        match self.probe_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.probe_byte_limit, 64);
        assert_eq!(config.probe_timeout(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{"probe_timeout_ms": 0}"#).unwrap();
        assert_eq!(config.probe_byte_limit, 64);
        assert_eq!(config.probe_timeout(), None);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            EditorConfig::from_json("{probe_byte_limit"),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"probe_byte_limit": 128}}"#).unwrap();

        let config = EditorConfig::load(file.path()).unwrap();
        assert_eq!(config.probe_byte_limit, 128);
        assert_eq!(config.probe_timeout_ms, 2000);
    }
}
