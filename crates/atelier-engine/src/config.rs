//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `atelier.yaml` at the project
//! root. Every field has a default so an absent or partial file still
//! yields a working engine.

use std::path::Path;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

// ---------------------------------------------------------------------------
// Config structures
// ---------------------------------------------------------------------------

/// Top-level engine configuration, mirroring `atelier.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// History retention settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Auto-save cadence settings.
    #[serde(default)]
    pub autosave: AutosaveConfig,

    /// Organism population settings.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `ATELIER_LOG` environment variable overrides `logging.level`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.logging.apply_env_overrides();
        Ok(config)
    }
}

/// History retention configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryConfig {
    /// Trailing window of snapshots to retain.
    #[serde(default = "default_history_window")]
    pub window: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            window: default_history_window(),
        }
    }
}

/// Auto-save cadence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AutosaveConfig {
    /// Seconds between automatic snapshots of the active project.
    #[serde(default = "default_autosave_seconds")]
    pub interval_seconds: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_autosave_seconds(),
        }
    }
}

/// Organism population configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PopulationConfig {
    /// Maximum concurrently active organisms.
    #[serde(default = "default_max_active")]
    pub max_active: usize,

    /// Lower bound of the enrichment seed range, in thousandths.
    #[serde(default = "default_seed_min_millis")]
    pub seed_min_millis: i64,

    /// Upper bound of the enrichment seed range, in thousandths.
    #[serde(default = "default_seed_max_millis")]
    pub seed_max_millis: i64,
}

impl PopulationConfig {
    /// The enrichment seed range as an inclusive range, with the bounds
    /// reordered if the file swapped them.
    #[must_use]
    pub fn seed_range(&self) -> core::ops::RangeInclusive<i64> {
        let lo = self.seed_min_millis.min(self.seed_max_millis);
        let hi = self.seed_min_millis.max(self.seed_max_millis);
        lo..=hi
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            max_active: default_max_active(),
            seed_min_millis: default_seed_min_millis(),
            seed_max_millis: default_seed_max_millis(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter directive (`info`, `debug`, ...).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl LoggingConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("ATELIER_LOG")
            && !level.is_empty()
        {
            self.level = level;
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_history_window() -> usize {
    50
}

fn default_autosave_seconds() -> u64 {
    30
}

fn default_max_active() -> usize {
    10
}

fn default_seed_min_millis() -> i64 {
    300
}

fn default_seed_max_millis() -> i64 {
    800
}

fn default_log_level() -> String {
    "info".to_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
