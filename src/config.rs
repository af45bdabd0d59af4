//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.
//!
//! Every field is optional; a missing file section falls back to the
//! defaults below. Command-line flags override the loaded values.
//!
//! ```toml
//! [database]
//! use_builtin = true
//! env_var = "SDL_GAMECONTROLLERCONFIG"
//! mapping_files = ["/usr/share/sdl/gamecontrollerdb.txt"]
//!
//! [devices]
//! search_dir = "/dev/input/by-path"
//! suffix = "event-joystick"
//!
//! [logging]
//! level = "info"
//! file = "/var/log/padmap.log"
//! ```

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PadmapError, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub devices: DevicesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Mapping database sources
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Load the compiled-in mappings at default priority
    #[serde(default = "default_use_builtin")]
    pub use_builtin: bool,

    /// Environment variable holding user mappings, loaded at user priority
    #[serde(default = "default_env_var")]
    pub env_var: String,

    /// Mapping files loaded at API priority, in order
    #[serde(default)]
    pub mapping_files: Vec<PathBuf>,
}

/// Device discovery configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DevicesConfig {
    #[serde(default = "default_search_dir")]
    pub search_dir: PathBuf,

    #[serde(default = "default_suffix")]
    pub suffix: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub file: Option<PathBuf>,
}

// Default value functions
fn default_use_builtin() -> bool { true }
fn default_env_var() -> String { "SDL_GAMECONTROLLERCONFIG".to_string() }

fn default_search_dir() -> PathBuf { PathBuf::from("/dev/input/by-path") }
fn default_suffix() -> String { "event-joystick".to_string() }

fn default_level() -> String { "info".to_string() }

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            use_builtin: default_use_builtin(),
            env_var: default_env_var(),
            mapping_files: Vec::new(),
        }
    }
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            search_dir: default_search_dir(),
            suffix: default_suffix(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use padmap::config::Config;
    ///
    /// let config = Config::load("/etc/padmap.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of its valid set
    pub fn validate(&self) -> Result<()> {
        if self.devices.search_dir.as_os_str().is_empty() {
            return Err(PadmapError::Config(toml::de::Error::custom(
                "devices search_dir cannot be empty",
            )));
        }

        if self.devices.suffix.is_empty() {
            return Err(PadmapError::Config(toml::de::Error::custom(
                "devices suffix cannot be empty",
            )));
        }

        if self.database.env_var.is_empty() || self.database.env_var.contains('=') {
            return Err(PadmapError::Config(toml::de::Error::custom(
                "database env_var must be a non-empty variable name",
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(PadmapError::Config(toml::de::Error::custom(format!(
                "logging level must be one of: {}",
                LOG_LEVELS.join(", ")
            ))));
        }

        Ok(())
    }
}
