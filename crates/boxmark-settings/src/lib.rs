//! Boxmark Settings Crate
//!
//! Handles the application configuration file and its validation.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, Config, SessionSettings, UiSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
