//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Coompo configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of `*.html` templates overriding the embedded ones
    pub template_dir: Option<PathBuf>,

    /// Directory of extra `*.yaml` form definitions
    pub definitions_dir: Option<PathBuf>,

    /// Default output format
    pub default_format: Option<String>,

    /// Log filter directive (e.g. "info", "coompo=debug")
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/coompo/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Local config (.coompo/config.yaml in the working directory)
        if let Ok(cwd) = std::env::current_dir() {
            if let Some(local) = Self::read_file(&cwd.join(".coompo").join("config.yaml")) {
                config.merge(local);
            }
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    /// Read one config file; missing or malformed files are skipped
    pub fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                None
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "coompo")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var("COOMPO_TEMPLATE_DIR") {
            self.template_dir = Some(PathBuf::from(dir));
        }
        if let Some(dir) = var("COOMPO_DEFINITIONS_DIR") {
            self.definitions_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = var("COOMPO_LOG") {
            self.log_level = Some(level);
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.template_dir.is_some() {
            self.template_dir = other.template_dir;
        }
        if other.definitions_dir.is_some() {
            self.definitions_dir = other.definitions_dir;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
    }

    /// Log filter to use when none is given on the command line
    pub fn log_filter(&self, verbose: bool) -> String {
        match (&self.log_level, verbose) {
            (Some(level), _) => level.clone(),
            (None, true) => "debug".to_string(),
            (None, false) => "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_file_and_merge() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "template_dir: /tmp/templates\nlog_level: info\n").unwrap();

        let mut config = Config {
            default_format: Some("json".into()),
            log_level: Some("trace".into()),
            ..Config::default()
        };
        config.merge(Config::read_file(&path).unwrap());

        assert_eq!(config.template_dir, Some(PathBuf::from("/tmp/templates")));
        assert_eq!(config.log_level.as_deref(), Some("info"));
        assert_eq!(config.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_read_missing_or_malformed_file() {
        let tmp = TempDir::new().unwrap();
        assert!(Config::read_file(&tmp.path().join("missing.yaml")).is_none());

        let bad = tmp.path().join("bad.yaml");
        std::fs::write(&bad, "template_dir: [unclosed").unwrap();
        assert!(Config::read_file(&bad).is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(|key| match key {
            "COOMPO_LOG" => Some("coompo=trace".to_string()),
            "COOMPO_DEFINITIONS_DIR" => Some("forms".to_string()),
            _ => None,
        });
        assert_eq!(config.log_level.as_deref(), Some("coompo=trace"));
        assert_eq!(config.definitions_dir, Some(PathBuf::from("forms")));
        assert!(config.template_dir.is_none());
    }

    #[test]
    fn test_log_filter() {
        let mut config = Config::default();
        assert_eq!(config.log_filter(false), "warn");
        assert_eq!(config.log_filter(true), "debug");
        config.log_level = Some("info".into());
        assert_eq!(config.log_filter(true), "info");
    }
}
