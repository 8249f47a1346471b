//! Configuration and settings management for Boxmark
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Canvas tuning (zoom limits, pan sensitivity, hit-test thresholds)
//! - Session state (last opened folder, recognised image extensions)
//! - Window geometry

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Canvas interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Multiplier applied to pointer deltas while panning
    pub move_sensitivity: f64,
    /// Scale change per 120 wheel units (one notch)
    pub zoom_step: f64,
    /// Smallest allowed scale
    pub min_zoom: f64,
    /// Largest allowed scale
    pub max_zoom: f64,
    /// Pointer-to-vertex distance that counts as hovering a vertex
    pub highlight_radius: f64,
    /// Create drags shorter than this are treated as clicks
    pub min_create_distance: f64,
    /// Presses that travel less than this are clicks, not drags
    pub min_move_distance: f64,
    /// Extra logical space around the image, in image pixels
    pub canvas_padding: i32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            move_sensitivity: 0.5,
            zoom_step: 0.3,
            min_zoom: 0.5,
            max_zoom: 5.0,
            highlight_radius: 8.0,
            min_create_distance: 10.0,
            min_move_distance: 1.3,
            canvas_padding: 50,
        }
    }
}

/// Image session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Folder opened during the previous run
    pub last_folder: Option<PathBuf>,
    /// File extensions listed as images (lowercase, no dot)
    pub image_extensions: Vec<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            last_folder: None,
            image_extensions: vec!["jpg".to_string(), "png".to_string()],
        }
    }
}

/// UI preference settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Window width
    pub window_width: u32,
    /// Window height
    pub window_height: u32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 800,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Canvas tuning
    pub canvas: CanvasSettings,
    /// Session state
    pub session: SessionSettings,
    /// UI preferences
    pub ui: UiSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/boxmark/config.json`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()))?;
        Ok(base.join("boxmark").join("config.json"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load config, falling back to defaults when the file is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = format_of(path)?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let c = &self.canvas;
        let positive = [
            ("canvas.move_sensitivity", c.move_sensitivity),
            ("canvas.zoom_step", c.zoom_step),
            ("canvas.min_zoom", c.min_zoom),
            ("canvas.highlight_radius", c.highlight_radius),
            ("canvas.min_create_distance", c.min_create_distance),
            ("canvas.min_move_distance", c.min_move_distance),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
        }

        if c.max_zoom < c.min_zoom {
            return Err(SettingsError::InvalidSetting {
                key: "canvas.max_zoom".to_string(),
                reason: "must be >= min_zoom".to_string(),
            });
        }

        if c.canvas_padding < 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "canvas.canvas_padding".to_string(),
                value: c.canvas_padding.to_string(),
            }
            .into());
        }

        if self.session.image_extensions.is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "session.image_extensions".to_string(),
                reason: "at least one extension is required".to_string(),
            });
        }

        if self.ui.window_width == 0 || self.ui.window_height == 0 {
            return Err(SettingsError::InvalidSetting {
                key: "ui".to_string(),
                reason: "window dimensions must be > 0".to_string(),
            });
        }

        Ok(())
    }

    /// Remember the folder for the next run
    pub fn set_last_folder(&mut self, folder: impl Into<PathBuf>) {
        self.session.last_folder = Some(folder.into());
    }
}
