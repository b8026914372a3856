//! Configuration for the gallery widget.
//!
//! Settings are stored as versioned JSON. In the browser they live in
//! `localStorage`; anything missing or unreadable falls back to defaults.

use serde::{Deserialize, Serialize};

use crate::keybindings::KeyBindings;
use crate::lightbox::{DEFAULT_PRELOAD_DISTANCE, MAX_PRELOAD_DISTANCE};
use crate::transform::{MAX_ZOOM, MIN_ZOOM, ZoomBounds};

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
        self.to_level().to_level_filter()
    }

    /// Convert to log crate's Level.
    pub fn to_level(&self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Default zoom change per wheel notch.
pub const DEFAULT_ZOOM_STEP: f32 = 0.1;

/// Default API root; set endpoints hang off `{api_base}/sets`.
pub const DEFAULT_API_BASE: &str = "/api";

/// Zoom behaviour of the lightbox.
///
/// The lowest zoom level is always `MIN_ZOOM` (fit to viewport).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    /// Highest zoom level, at most `MAX_ZOOM`
    #[serde(default = "default_max_zoom")]
    pub max: f32,
    /// Zoom change per wheel notch
    #[serde(default = "default_zoom_step")]
    pub step: f32,
    /// Only zoom on wheel when Ctrl is held
    #[serde(default)]
    pub wheel_requires_ctrl: bool,
}

fn default_max_zoom() -> f32 {
    MAX_ZOOM
}

fn default_zoom_step() -> f32 {
    DEFAULT_ZOOM_STEP
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            max: default_max_zoom(),
            step: default_zoom_step(),
            wheel_requires_ctrl: false,
        }
    }
}

impl ZoomConfig {
    pub fn bounds(&self) -> ZoomBounds {
        ZoomBounds::new(MIN_ZOOM, self.max)
    }

    /// Zoom delta for a wheel event with the given vertical delta.
    /// Scrolling up zooms in.
    pub fn wheel_delta(&self, delta_y: f64) -> f32 {
        if delta_y < 0.0 { self.step } else { -self.step }
    }
}

/// Gallery configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Version of the configuration format
    pub version: u32,

    /// Root URL of the sets API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Lightbox zoom settings
    #[serde(default)]
    pub zoom: ZoomConfig,

    /// Number of images to preload on each side of the current one
    #[serde(default = "default_preload_distance")]
    pub preload_distance: usize,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Lightbox keybindings
    #[serde(default)]
    pub keybindings: KeyBindings,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_preload_distance() -> usize {
    DEFAULT_PRELOAD_DISTANCE
}

impl GalleryConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            api_base: default_api_base(),
            zoom: ZoomConfig::default(),
            preload_distance: default_preload_distance(),
            log_level: LogLevel::default(),
            keybindings: KeyBindings::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize and validate configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let zoom = &self.zoom;
        if zoom.max.is_nan() || zoom.max <= MIN_ZOOM || zoom.max > MAX_ZOOM {
            return Err(ConfigError::Invalid(format!(
                "max zoom {} must be above {} and at most {}",
                zoom.max, MIN_ZOOM, MAX_ZOOM
            )));
        }
        if zoom.step.is_nan() || zoom.step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "zoom step {} must be positive",
                zoom.step
            )));
        }
        if self.preload_distance > MAX_PRELOAD_DISTANCE {
            return Err(ConfigError::Invalid(format!(
                "preload distance {} exceeds {}",
                self.preload_distance, MAX_PRELOAD_DISTANCE
            )));
        }
        Ok(())
    }

    /// LocalStorage key for config persistence.
    #[cfg(target_arch = "wasm32")]
    const LOCALSTORAGE_KEY: &'static str = "setgallery-config";

    /// Try to load configuration from localStorage.
    /// Returns None if not found or can't be parsed.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_local_storage() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;

        match storage.get_item(Self::LOCALSTORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from localStorage");
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config from localStorage: {}", e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("No config found in localStorage");
                None
            }
            Err(e) => {
                log::warn!("Failed to read from localStorage: {:?}", e);
                None
            }
        }
    }

    /// Save configuration to localStorage.
    #[cfg(target_arch = "wasm32")]
    pub fn save_to_local_storage(&self) -> Result<(), ConfigError> {
        let window = web_sys::window()
            .ok_or_else(|| ConfigError::StorageError("No window object available".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| ConfigError::StorageError(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| ConfigError::StorageError("localStorage not available".to_string()))?;

        let json = self.to_json()?;

        storage
            .set_item(Self::LOCALSTORAGE_KEY, &json)
            .map_err(|e| {
                ConfigError::StorageError(format!("Failed to save to localStorage: {:?}", e))
            })?;

        log::info!("Saved configuration to localStorage");
        Ok(())
    }
}

impl Default for GalleryConfig {
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
        "Configuration version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// Values that parse but make no sense
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Storage error (localStorage)
    #[error("Storage error: {0}")]
    StorageError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GalleryConfig::default();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.zoom.bounds(), ZoomBounds::new(1.0, 5.0));
        assert_eq!(config.preload_distance, 1);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_json_roundtrip_keeps_values() {
        let mut config = GalleryConfig::new();
        config.api_base = "https://gallery.example.com/api".to_string();
        config.zoom.wheel_requires_ctrl = true;
        config.log_level = LogLevel::Debug;

        let json = config.to_json().unwrap();
        let restored = GalleryConfig::from_json(&json).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = GalleryConfig::from_json(r#"{"version": 1}"#).unwrap();
        assert_eq!(config, GalleryConfig::default());
    }

    #[test]
    fn test_log_level_lowercase() {
        let config =
            GalleryConfig::from_json(r#"{"version": 1, "log_level": "warn"}"#).unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_version_too_new() {
        let err = GalleryConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_invalid_zoom_range() {
        for json in [
            r#"{"version": 1, "zoom": {"max": 1.0}}"#,
            r#"{"version": 1, "zoom": {"max": 0.5}}"#,
            r#"{"version": 1, "zoom": {"max": 8.0}}"#,
        ] {
            assert!(matches!(
                GalleryConfig::from_json(json),
                Err(ConfigError::Invalid(_))
            ));
        }

        let json = r#"{"version": 1, "zoom": {"step": 0.0}}"#;
        assert!(matches!(
            GalleryConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_zoom_min_is_fixed() {
        let config =
            GalleryConfig::from_json(r#"{"version": 1, "zoom": {"min": 3.0, "max": 4.0}}"#)
                .unwrap();
        assert_eq!(config.zoom.bounds(), ZoomBounds::new(MIN_ZOOM, 4.0));
    }

    #[test]
    fn test_preload_distance_limit() {
        let json = r#"{"version": 1, "preload_distance": 18446744073709551615}"#;
        assert!(matches!(
            GalleryConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));

        let json = format!(r#"{{"version": 1, "preload_distance": {}}}"#, MAX_PRELOAD_DISTANCE);
        let config = GalleryConfig::from_json(&json).unwrap();
        assert_eq!(config.preload_distance, MAX_PRELOAD_DISTANCE);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GalleryConfig::from_json("{not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_wheel_delta_direction() {
        let zoom = ZoomConfig::default();
        assert_eq!(zoom.wheel_delta(-120.0), 0.1);
        assert_eq!(zoom.wheel_delta(120.0), -0.1);
        assert_eq!(zoom.wheel_delta(0.0), -0.1);
    }
}
