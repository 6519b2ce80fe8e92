//! Application configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::storage::persistence::DEFAULT_KEY;
use crate::workouts::input::ElevationPolicy;
use crate::workouts::types::Coords;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Map settings
    pub map: MapSettings,
    /// Entry form settings
    pub form: FormSettings,
    /// Storage settings
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            map: MapSettings::default(),
            form: FormSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}

impl AppConfig {
    /// Full path of the workout database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage.database_file)
    }
}

/// Map-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Zoom level used when centering the map
    pub default_zoom: u8,
    /// Duration of the pan animation when jumping to a workout
    pub pan_duration_secs: f32,
    /// Starting position reported as the current location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<Coords>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_zoom: 13,
            pan_duration_secs: 1.0,
            home: None,
        }
    }
}

/// Entry form settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// How long the form stays unavailable after it closes
    pub hide_delay_ms: u64,
    /// Validation rule for cycling elevation gain
    pub elevation_policy: ElevationPolicy,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            hide_delay_ms: 1000,
            elevation_policy: ElevationPolicy::default(),
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Key of the workout snapshot
    pub key: String,
    /// Database file name inside the data directory
    pub database_file: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.to_string(),
            database_file: "trackpin.db".to_string(),
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "trackpin", "Trackpin")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from file.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = get_config_path();

    if !path.exists() {
        let config = AppConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        };
        return Ok(config);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config = parse_config(&content)?;
    config.data_dir = get_data_dir();

    Ok(config)
}

/// Parse configuration text.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Save application configuration to file.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = get_config_path();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
