//! Cutpath Settings Crate
//!
//! Handles persistent configuration: processing tolerances, sampling
//! densities and output preferences.

pub mod config;
pub mod error;

pub use config::{Config, OutputSettings, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{ConfigError, SettingsError, SettingsResult};
