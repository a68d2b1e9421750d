use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::DEFAULT_IDLE_TIMEOUT;

/// Shell configuration, read from a JSON file in the application directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds of inactivity before the session is signed out.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout: u32,
}

fn default_idle_timeout() -> u32 {
    DEFAULT_IDLE_TIMEOUT
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

/// Loads the shell config. A missing file means defaults; a present but
/// malformed file is an error.
pub fn load_config(path: &Path) -> Result<SessionConfig> {
    if !path.exists() {
        return Ok(SessionConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("couldn't read config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod config_tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.idle_timeout, DEFAULT_IDLE_TIMEOUT);
    }

    #[test]
    fn overrides_are_parsed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "idle_timeout": 5400 }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.idle_timeout, 5400);
    }

    #[test]
    fn empty_object_uses_field_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.idle_timeout, DEFAULT_IDLE_TIMEOUT);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(load_config(&path).is_err());
    }
}
