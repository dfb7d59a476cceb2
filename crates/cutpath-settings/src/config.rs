//! Configuration and settings management for cutpath
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config
//! directory (`<config dir>/cutpath/config.toml` by default).
//!
//! Configuration is organized into logical sections:
//! - Processing settings (tolerance, sampling densities)
//! - Output preferences (destination directory, SVG preview)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use cutpath_geometry::ProcessingOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory created under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "cutpath";
/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory receiving exported trajectory files
    pub output_directory: PathBuf,
    /// Also write an SVG preview next to every export
    pub write_preview: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            write_preview: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Pipeline tunables
    pub processing: ProcessingOptions,
    /// Output preferences
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("platform config directory not found".to_string())
            })
    }

    /// Load the default config file, falling back to defaults when it does
    /// not exist.
    pub fn load_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file; using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(&path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        let save_error = |source: std::io::Error| SettingsError::Save {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(save_error)?;
        }
        std::fs::write(path, content).map_err(save_error)?;

        tracing::info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.processing;
        if !(p.tolerance.is_finite() && p.tolerance > 0.0) {
            return Err(out_of_range("processing.tolerance", p.tolerance));
        }

        for (key, samples) in [
            ("processing.circle_samples", p.circle_samples),
            ("processing.arc_samples", p.arc_samples),
            ("processing.spline_samples", p.spline_samples),
        ] {
            if samples < 2 {
                return Err(out_of_range(key, samples));
            }
        }

        if self.output.output_directory.as_os_str().is_empty() {
            return Err(out_of_range("output.output_directory", "\"\""));
        }

        Ok(())
    }

    /// Processing options for a pipeline run
    pub fn processing_options(&self) -> ProcessingOptions {
        self.processing
    }

    /// Processing options with the tolerance overridden when given
    pub fn processing_options_with(&self, tolerance: Option<f64>) -> ProcessingOptions {
        match tolerance {
            Some(tolerance) => ProcessingOptions {
                tolerance,
                ..self.processing
            },
            None => self.processing,
        }
    }
}

fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}
