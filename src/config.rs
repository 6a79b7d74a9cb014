//! Configuration file support for the label editor.
//!
//! Holds the category list offered to the labeler and the editor's drawing
//! and sizing preferences.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_HANDLE_RADIUS, DEFAULT_HIDDEN_HANDLE_RADIUS, DEFAULT_LINE_WIDTH, DEFAULT_MIN_BOX_SIZE,
};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Editor configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Category names offered to the labeler; the first is selected initially
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Editor preferences
    #[serde(default)]
    pub preferences: Preferences,
}

fn default_app_name() -> String {
    "sat-label".to_string()
}

fn default_categories() -> Vec<String> {
    ["car", "pedestrian", "bicycle", "traffic light", "traffic sign"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Drawing and sizing preferences of the 2D editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Boxes smaller than this (image pixels) are dropped on release
    #[serde(default = "default_min_box_size")]
    pub min_box_size: f32,

    /// Half-size of the visible handle squares (canvas pixels)
    #[serde(default = "default_handle_radius")]
    pub handle_radius: f32,

    /// Half-size of the handle squares on the picking surface (canvas pixels)
    #[serde(default = "default_hidden_handle_radius")]
    pub hidden_handle_radius: f32,

    /// Outline width of unselected boxes (canvas pixels)
    #[serde(default = "default_line_width")]
    pub line_width: f32,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_min_box_size() -> f32 {
    DEFAULT_MIN_BOX_SIZE
}

fn default_handle_radius() -> f32 {
    DEFAULT_HANDLE_RADIUS
}

fn default_hidden_handle_radius() -> f32 {
    DEFAULT_HIDDEN_HANDLE_RADIUS
}

fn default_line_width() -> f32 {
    DEFAULT_LINE_WIDTH
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            min_box_size: default_min_box_size(),
            handle_radius: default_handle_radius(),
            hidden_handle_radius: default_hidden_handle_radius(),
            line_width: default_line_width(),
            log_level: LogLevel::default(),
        }
    }
}

impl EditorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            categories: default_categories(),
            preferences: Preferences::default(),
        }
    }

    /// Category selected when the editor starts.
    pub fn default_category(&self) -> &str {
        self.categories.first().map_or("", String::as_str)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "sat-label-config.json"
    }

    /// Get the default config file path for auto-load/save.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("sat-label").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("sat-label")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from a file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {:?}", path);
                Some(config)
            }
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(&path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
