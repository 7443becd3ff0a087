use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use kaltrack_core::DisplayPolicy;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Path to the JSON data file
    pub data_path: ConfigValue<PathBuf>,
    /// Default display policy for history listings ("combine" or "recent")
    pub display: ConfigValue<String>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_path: Option<PathBuf>,
    display: Option<String>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let default_data_path = Self::default_data_dir().join("data.json");

        // Start with defaults
        let mut data_path = ConfigValue::new(default_data_path, ConfigSource::Default);
        let mut display = ConfigValue::new("combine".to_string(), ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(data) = file_config.data_path {
                // Resolve relative paths against config file's directory
                let resolved = if data.is_relative() {
                    path.parent().map(|p| p.join(&data)).unwrap_or(data)
                } else {
                    data
                };
                data_path = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(policy) = file_config.display {
                display = ConfigValue::new(policy, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(path) = std::env::var("KAL_DATA_PATH") {
            data_path = ConfigValue::new(PathBuf::from(path), ConfigSource::Environment);
        }
        if let Ok(policy) = std::env::var("KAL_DISPLAY") {
            display = ConfigValue::new(policy, ConfigSource::Environment);
        }

        if parse_policy(&display.value).is_none() {
            return Err(ConfigError::InvalidDisplay(display.value));
        }

        Ok(Self {
            data_path,
            display,
            config_file,
        })
    }

    /// The configured display policy. `Config::load` already validated the
    /// string, so the fallback here is unreachable after a successful load.
    pub fn display_policy(&self) -> DisplayPolicy {
        parse_policy(&self.display.value).unwrap_or_default()
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/kaltrack/
    /// - macOS: ~/Library/Application Support/kaltrack/
    /// - Windows: %APPDATA%/kaltrack/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kaltrack")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/kaltrack/
    /// - macOS: ~/Library/Application Support/kaltrack/
    /// - Windows: %APPDATA%/kaltrack/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kaltrack")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

fn parse_policy(value: &str) -> Option<DisplayPolicy> {
    match value {
        "combine" => Some(DisplayPolicy::CombineByName),
        "recent" => Some(DisplayPolicy::RecentFirst),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidDisplay(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidDisplay(value) => {
                write!(
                    f,
                    "Invalid display policy '{}' (expected 'combine' or 'recent')",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
