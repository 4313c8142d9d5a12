use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stopwatch_core::DEFAULT_TICK_MS;

use crate::cues::CueConfig;
use crate::error::AppError;

const APP_NAME: &str = "stopwatch";
const CONFIG_NAME: &str = "config";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub cues: CueConfig,
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_MS
}

fn default_export_path() -> PathBuf {
    PathBuf::from("laps.txt")
}

fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("stopwatch.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            cues: CueConfig::default(),
            export_path: default_export_path(),
            log_file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the per-user config location when `None`.
    /// A missing file is created with defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let loaded = match path {
            Some(path) => confy::load_path(path),
            None => confy::load(APP_NAME, CONFIG_NAME),
        };
        loaded.map_err(AppError::ConfigLoad)
    }

    pub fn store(&self, path: Option<&Path>) -> Result<(), AppError> {
        let stored = match path {
            Some(path) => confy::store_path(path, self),
            None => confy::store(APP_NAME, CONFIG_NAME, self),
        };
        stored.map_err(AppError::ConfigStore)
    }

    /// Where the per-user config lives when no explicit path is given.
    pub fn default_location() -> Option<PathBuf> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tick_interval_ms, 10);
        assert!(config.cues.audio);
        assert_eq!(config.export_path, PathBuf::from("laps.txt"));
        assert_eq!(config.log_file, std::env::temp_dir().join("stopwatch.log"));
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let config = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        let mut config = AppConfig::default();
        config.tick_interval_ms = 25;
        config.cues.audio = false;
        config.export_path = dir.path().join("out.txt");
        config.store(Some(path.as_path())).unwrap();

        let loaded = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "tick_interval_ms: 50\n").unwrap();
        let loaded = AppConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(loaded.tick_interval_ms, 50);
        assert_eq!(loaded.cues, CueConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "tick_interval_ms: [not, a, number]\n").unwrap();
        assert!(matches!(AppConfig::load(Some(path.as_path())), Err(AppError::ConfigLoad(_))));
    }
}
