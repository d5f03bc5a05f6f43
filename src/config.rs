//! Application configuration.
//!
//! Read once at startup from `config.toml` in the platform config directory
//! (or the file named by `MOOD_CALENDAR_CONFIG`). A missing file means
//! defaults; a broken one is reported and defaults are used.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::heatmap::hash::DEFAULT_JITTER_AMPLITUDE;
use crate::heatmap::reveal::DEFAULT_WINDOW_MS as DEFAULT_REVEAL_WINDOW_MS;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const CONFIG_PATH_ENV: &str = "MOOD_CALENDAR_CONFIG";

const MAX_JITTER_AMPLITUDE: f32 = 8.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Explicit database file; otherwise a per-build default is used
    pub database_path: Option<PathBuf>,
    /// Base URL diary links are resolved against
    pub site_base_url: String,
    /// Total duration of the entry reveal animation
    pub reveal_window_ms: u32,
    /// Maximum cosmetic offset of a heatmap cell, in points
    pub jitter_amplitude: f32,
    /// Show demo entries while the database has none
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            site_base_url: "http://localhost:3000".to_string(),
            reveal_window_ms: DEFAULT_REVEAL_WINDOW_MS,
            jitter_amplitude: DEFAULT_JITTER_AMPLITUDE,
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    /// Where the config file is looked up.
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Loads the config file, falling back to defaults on any problem.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::config_path() else {
            log::info!("No config directory available, using default configuration");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}, using default configuration", e);
                Self::default()
            }
        }
    }

    /// Loads and validates `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reveal_window_ms == 0 {
            return Err(ConfigError::Invalid(
                "reveal_window_ms must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=MAX_JITTER_AMPLITUDE).contains(&self.jitter_amplitude) {
            return Err(ConfigError::Invalid(format!(
                "jitter_amplitude must be between 0 and {}",
                MAX_JITTER_AMPLITUDE
            )));
        }
        if !(self.site_base_url.starts_with("http://") || self.site_base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "site_base_url '{}' must start with http:// or https://",
                self.site_base_url
            )));
        }
        Ok(())
    }

    /// Database file to open. Debug builds keep it next to the working
    /// directory; release builds use the platform data directory.
    pub fn resolve_database_path(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }

        #[cfg(debug_assertions)]
        {
            PathBuf::from("mood_calendar.db")
        }

        #[cfg(not(debug_assertions))]
        {
            match project_dirs() {
                Some(dirs) => {
                    let data_dir = dirs.data_dir();
                    if let Err(e) = std::fs::create_dir_all(data_dir) {
                        log::warn!("Failed to create data directory {}: {}", data_dir.display(), e);
                    }
                    data_dir.join("mood_calendar.db")
                }
                None => PathBuf::from("mood_calendar_prod.db"),
            }
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "MoodCalendar", "MoodCalendar")
}
