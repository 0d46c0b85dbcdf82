//! Configuration module for the oscilloscope
//!
//! This module handles the scope configuration:
//! - Sampling grid of the main sine panel (point count and duration)
//! - Slider ranges and fixed parameters of every panel
//! - Loading/saving as TOML or JSON, chosen by file extension
//!
//! # Config Location
//!
//! When no path is given, the binary looks for `scope.toml` in the
//! platform-appropriate data directory under `oscilloscope-rs`:
//! - **Linux**: `~/.local/share/oscilloscope-rs/`
//! - **macOS**: `~/Library/Application Support/oscilloscope-rs/`
//! - **Windows**: `%APPDATA%\oscilloscope-rs\`
//!
//! # Example
//!
//! ```toml
//! points = 300
//! t_max = 3.0
//!
//! [panels.sine.frequency]
//! min = 0.1
//! max = 5.0
//! initial = 1.0
//!
//! [panels.noise]
//! seed = 42
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{Result, ScopeError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "oscilloscope-rs";

/// Default config filename
pub const CONFIG_FILE: &str = "scope.toml";

/// Default number of samples in the main sine panel
pub const DEFAULT_POINTS: usize = 300;

/// Default sampled duration of the main sine panel in seconds
pub const DEFAULT_T_MAX: f64 = 3.0;

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Get the path to the default config file
pub fn default_config_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(CONFIG_FILE))
}

/// On-disk encoding of a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(ConfigFormat::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ConfigFormat::Json),
            _ => Err(ScopeError::Config(format!(
                "Unsupported config file extension for {:?} (expected .toml or .json)",
                path
            ))),
        }
    }
}

/// Top-level oscilloscope configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Samples in the main sine panel
    #[serde(default = "default_points")]
    pub points: usize,

    /// Duration sampled by the main sine panel (seconds)
    #[serde(default = "default_t_max")]
    pub t_max: f64,

    /// Per-panel settings
    #[serde(default)]
    pub panels: PanelSettings,
}

fn default_points() -> usize {
    DEFAULT_POINTS
}

fn default_t_max() -> f64 {
    DEFAULT_T_MAX
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            points: DEFAULT_POINTS,
            t_max: DEFAULT_T_MAX,
            panels: PanelSettings::default(),
        }
    }
}

impl ScopeConfig {
    /// Load a config file, TOML or JSON by extension, and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScopeError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: Self = match format {
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| {
                ScopeError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?,
            ConfigFormat::Json => serde_json::from_str(&content).map_err(|e| {
                ScopeError::Config(format!("Failed to parse config file {:?}: {}", path, e))
            })?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Load a config file, returning defaults if any error occurs
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config to disk, TOML or JSON by extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScopeError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = match format {
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| ScopeError::Serialization(format!("Failed to serialize config: {}", e)))?,
            ConfigFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| ScopeError::Serialization(format!("Failed to serialize config: {}", e)))?,
        };

        std::fs::write(path, content).map_err(|e| {
            ScopeError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }

    /// Check the sampling grid and every panel
    pub fn validate(&self) -> Result<()> {
        if self.points == 0 {
            return Err(ScopeError::Config("points must be at least 1".to_string()));
        }
        if !self.t_max.is_finite() || self.t_max <= 0.0 {
            return Err(ScopeError::Config(format!(
                "t_max must be positive, got {}",
                self.t_max
            )));
        }
        self.panels.validate()
    }

    /// Override the sampling grid
    pub fn with_grid(mut self, points: usize, t_max: f64) -> Self {
        self.points = points;
        self.t_max = t_max;
        self
    }
}
