//! ordo configuration system
//!
//! Supports user-level and project-level configuration with merge semantics.
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. Environment variables (ORDO_LOG, ORDO_ORDER, ORDO_FORMAT)
//! 3. Project-level (./ordo.ron)
//! 4. User-level (~/.config/ordo/config.ron)
//! 5. Default values
//! ```
//!
//! Files are RON and may set any subset of keys:
//!
//! ```text
//! (
//!     log: (level: debug),
//!     traverse: (order: in),
//!     output: (format: alias, color: false),
//! )
//! ```

use std::env::VarError;
use std::fs;
use std::path::{Path, PathBuf};

use ron::extensions::Extensions;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::emit::Format;
use crate::traverse::Order;
use crate::util::logger::LogLevel;

/// Project-level config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "ordo.ron";

/// Environment variables read into the env layer
pub const ENV_KEYS: [&str; 3] = ["ORDO_LOG", "ORDO_ORDER", "ORDO_FORMAT"];

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
    /// Traversal settings
    #[serde(default)]
    pub traverse: TraverseConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
}

/// Traversal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TraverseConfig {
    /// Order used when the CLI does not name one
    #[serde(default)]
    pub order: Order,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Format,
    /// Colour headers and error lines
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: Format::Plain,
            color: true,
        }
    }
}

/// A partial configuration: one source's settings, unset keys left `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigLayer {
    #[serde(default)]
    pub log: LogLayer,
    #[serde(default)]
    pub traverse: TraverseLayer,
    #[serde(default)]
    pub output: OutputLayer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LogLayer {
    #[serde(default)]
    pub level: Option<LogLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TraverseLayer {
    #[serde(default)]
    pub order: Option<Order>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutputLayer {
    #[serde(default)]
    pub format: Option<Format>,
    #[serde(default)]
    pub color: Option<bool>,
}

impl ConfigLayer {
    /// Build a layer from `ORDO_*` variables.
    ///
    /// Unrelated variables are ignored; a recognised variable with a bad
    /// value is an error.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut layer = ConfigLayer::default();
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            let invalid = |message: String| ConfigError::InvalidValue {
                key: key.to_string(),
                message,
            };
            match key {
                "ORDO_LOG" => layer.log.level = Some(value.parse().map_err(invalid)?),
                "ORDO_ORDER" => layer.traverse.order = Some(value.parse().map_err(invalid)?),
                "ORDO_FORMAT" => layer.output.format = Some(value.parse().map_err(invalid)?),
                _ => {}
            }
        }
        Ok(layer)
    }

    /// Build a layer from the process environment.
    ///
    /// Only [`ENV_KEYS`] are read; other variables may hold anything.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut vars = Vec::with_capacity(ENV_KEYS.len());
        for key in ENV_KEYS {
            match std::env::var(key) {
                Ok(value) => vars.push((key, value)),
                Err(VarError::NotPresent) => {}
                Err(VarError::NotUnicode(_)) => {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        message: "not valid unicode".to_string(),
                    })
                }
            }
        }
        Self::from_vars(vars)
    }
}

impl Config {
    /// Overwrite every key the layer sets.
    pub fn apply(
        &mut self,
        layer: &ConfigLayer,
    ) {
        if let Some(level) = layer.log.level {
            self.log.level = level;
        }
        if let Some(order) = layer.traverse.order {
            self.traverse.order = order;
        }
        if let Some(format) = layer.output.format {
            self.output.format = format;
        }
        if let Some(color) = layer.output.color {
            self.output.color = color;
        }
    }
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("ordo"));
    }

    // Fallback to ~/.config/ordo
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("ordo"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("ordo"));
    }

    None
}

/// Get the user config file path (~/.config/ordo/config.ron)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.ron"))
}

/// Parse one configuration source.
pub fn parse_layer(content: &str) -> Result<ConfigLayer, ConfigError> {
    ron::Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .from_str(content)
        .map_err(ConfigError::ParseError)
}

/// Load one configuration source. Returns `None` if the file doesn't exist.
pub fn load_layer(path: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(ConfigError::IoError)?;
    debug!(path = %path.display(), "loaded config file");
    parse_layer(&content).map(Some)
}

/// Load a single file on top of the defaults.
/// Returns default config if file doesn't exist.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    if let Some(layer) = load_layer(path)? {
        config.apply(&layer);
    }
    Ok(config)
}

/// Resolve the full hierarchy: user file, project file, environment, then
/// `overrides` (the CLI layer).
pub fn load_merged(overrides: &ConfigLayer) -> Result<Config, ConfigError> {
    merge_sources(
        get_config_path().as_deref(),
        Path::new(PROJECT_CONFIG_FILE),
        &ConfigLayer::from_env()?,
        overrides,
    )
}

/// Merge explicit sources, lowest priority first. Missing files are skipped.
pub fn merge_sources(
    user_file: Option<&Path>,
    project_file: &Path,
    env: &ConfigLayer,
    overrides: &ConfigLayer,
) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Some(path) = user_file {
        if let Some(layer) = load_layer(path)? {
            config.apply(&layer);
        }
    }
    if let Some(layer) = load_layer(project_file)? {
        config.apply(&layer);
    }
    config.apply(env);
    config.apply(overrides);

    Ok(config)
}

/// Save a configuration, creating the parent directory if needed.
pub fn save_to(
    path: &Path,
    config: &Config,
) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).map_err(ConfigError::IoError)?;
        }
    }

    let content = ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())
        .map_err(ConfigError::SerializeError)?;
    fs::write(path, content).map_err(ConfigError::IoError)?;

    Ok(())
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Config parse error: {0}")]
    ParseError(ron::error::SpannedError),
    #[error("Config serialize error: {0}")]
    SerializeError(ron::Error),
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
