//! Application configuration loaded from a JSON file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Runtime configuration. Every field has a default so a partial (or
/// missing) config file still yields a usable setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Template matching threshold, inclusive (score >= threshold matches).
    pub threshold: f32,
    /// Seconds between detection cycles in continuous mode.
    pub default_interval: u64,
    /// Save annotated screenshots of each successful detection.
    pub debug_mode: bool,
    pub debug_output_dir: PathBuf,
    /// Default log filter, overridable via RUST_LOG.
    pub log_level: String,
    /// Ordered subset of capture strategy names to try. Empty means the
    /// built-in default order.
    pub screenshot_methods: Vec<String>,
    /// Templates for the coarse "button line" pass.
    pub line_template_paths: Vec<PathBuf>,
    /// Templates for the refined button pass.
    pub button_template_paths: Vec<PathBuf>,
    /// Window title substring identifying the target editor window.
    pub target_window_title: String,
    /// Process name checked with pgrep before each cycle.
    pub process_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            threshold: 0.8,
            default_interval: 60,
            debug_mode: false,
            debug_output_dir: PathBuf::from("/tmp"),
            log_level: "info".to_string(),
            screenshot_methods: Vec::new(),
            line_template_paths: Vec::new(),
            button_template_paths: Vec::new(),
            target_window_title: "Visual Studio Code".to_string(),
            process_name: "code".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.threshold, 0.8);
        assert_eq!(config.default_interval, 60);
        assert!(!config.debug_mode);
        assert!(config.screenshot_methods.is_empty());
        assert_eq!(config.process_name, "code");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"threshold": 0.9, "process_name": "codium"}"#).unwrap();
        assert_eq!(config.threshold, 0.9);
        assert_eq!(config.process_name, "codium");
        assert_eq!(config.default_interval, 60);
        assert_eq!(config.target_window_title, "Visual Studio Code");
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let err = AppConfig::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
