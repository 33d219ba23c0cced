//! Configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::action::ActionDefinition;

/// Main daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level written to the log file (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Declarative action definitions driven by the daemon
    pub actions: Vec<ActionDefinition>,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast: a loop must never start with
    /// an invalid definition.
    pub fn validate(&self) -> Result<()> {
        for action in &self.actions {
            action
                .validate()
                .wrap_err_with(|| format!("invalid action '{}'", action.trigger))?;
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .actiond.yml
        let local_config = PathBuf::from(".actiond.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/actiond/actiond.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("actiond").join("actiond.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load just the log level, for use before logging is initialized
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok().and_then(|config| config.log_level)
    }

    /// Find a configured action by its trigger word
    pub fn find_action(&self, trigger: &str) -> Option<&ActionDefinition> {
        self.actions.iter().find(|action| action.trigger == trigger)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const SAMPLE: &str = "\
log-level: DEBUG
actions:
  - trigger: greet
    channels: [general]
    loop-time: 300
    sequence:
      - message: hi
  - trigger: sentinel
    run-always: true
";

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_load_explicit_path() {
        let file = write_config(SAMPLE);
        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
        assert_eq!(config.actions.len(), 2);
        assert_eq!(config.actions[0].trigger, "greet");
        assert_eq!(config.actions[0].loop_time_secs, 300);
        assert!(config.actions[1].run_always);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/actiond.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_rejects_invalid_yaml() {
        let file = write_config("actions: [not: [valid");
        assert!(Config::load(Some(&file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_action() {
        let file = write_config(
            "actions:\n  - trigger: bad\n    loop-range-time: [600, 120]\n",
        );
        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();

        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("invalid action 'bad'"));
    }

    #[test]
    fn test_find_action() {
        let file = write_config(SAMPLE);
        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();

        assert!(config.find_action("greet").is_some());
        assert!(config.find_action("missing").is_none());
    }

    #[test]
    fn test_load_log_level() {
        let file = write_config(SAMPLE);
        let level = Config::load_log_level(Some(&file.path().to_path_buf()));
        assert_eq!(level.as_deref(), Some("DEBUG"));
    }
}
