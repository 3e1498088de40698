//! Configuration support for the hotspot editor.
//!
//! Settings are serialized to JSON and persisted through a
//! [`KeyValueStore`] chosen by the host.

use hotmap_ui::constants::{HISTORY_LIMIT, ZOOM_FACTOR};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_STORAGE_KEY, DEFAULT_DRAWING_GUARD_MS, DEFAULT_HANDLE_HIT_RADIUS,
    DEFAULT_MARKER_HIT_RADIUS,
};
use crate::keybindings::KeyBindings;
use crate::kv_store::KeyValueStore;
use crate::model::{HotspotKind, HotspotStyle};

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

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Version of the configuration format
    pub version: u32,

    #[serde(default)]
    pub preferences: Preferences,

    #[serde(default)]
    pub keybindings: KeyBindings,

    /// Styles given to freshly drawn hotspots
    #[serde(default)]
    pub styles: StyleDefaults,
}

/// User preferences section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Dark theme enabled
    #[serde(default = "default_dark_theme")]
    pub dark_theme: bool,

    /// Screen radius (px) for grabbing vertex and midpoint handles
    #[serde(default = "default_handle_hit_radius")]
    pub handle_hit_radius: f32,

    /// Screen radius (px) for clicking info and camera markers
    #[serde(default = "default_marker_hit_radius")]
    pub marker_hit_radius: f32,

    /// Scale multiplier per wheel step
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,

    /// Lifetime of the drawing-start guard in milliseconds
    #[serde(default = "default_drawing_guard_ms")]
    pub drawing_guard_ms: u64,

    /// Maximum undo snapshots kept per view
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_dark_theme() -> bool {
    true
}

fn default_handle_hit_radius() -> f32 {
    DEFAULT_HANDLE_HIT_RADIUS
}

fn default_marker_hit_radius() -> f32 {
    DEFAULT_MARKER_HIT_RADIUS
}

fn default_zoom_step() -> f32 {
    ZOOM_FACTOR
}

fn default_drawing_guard_ms() -> u64 {
    DEFAULT_DRAWING_GUARD_MS
}

fn default_history_limit() -> usize {
    HISTORY_LIMIT
}

impl Preferences {
    /// Reject values that would break zooming or hit testing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.zoom_step.is_finite() || self.zoom_step <= 0.0 {
            return Err(ConfigError::InvalidPreference {
                name: "zoom_step",
                value: self.zoom_step,
            });
        }
        for (name, value) in [
            ("handle_hit_radius", self.handle_hit_radius),
            ("marker_hit_radius", self.marker_hit_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidPreference { name, value });
            }
        }
        Ok(())
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            dark_theme: default_dark_theme(),
            handle_hit_radius: default_handle_hit_radius(),
            marker_hit_radius: default_marker_hit_radius(),
            zoom_step: default_zoom_step(),
            drawing_guard_ms: default_drawing_guard_ms(),
            history_limit: default_history_limit(),
        }
    }
}

/// Default style per hotspot kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleDefaults {
    pub polygon: HotspotStyle,
    pub info: HotspotStyle,
    pub camera: HotspotStyle,
}

impl StyleDefaults {
    pub fn for_kind(&self, kind: HotspotKind) -> HotspotStyle {
        match kind {
            HotspotKind::Polygon => self.polygon,
            HotspotKind::Info => self.info,
            HotspotKind::Camera => self.camera,
        }
    }
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            polygon: HotspotStyle::default_for(HotspotKind::Polygon),
            info: HotspotStyle::default_for(HotspotKind::Info),
            camera: HotspotStyle::default_for(HotspotKind::Camera),
        }
    }
}

impl EditorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: Preferences::default(),
            keybindings: KeyBindings::default(),
            styles: StyleDefaults::default(),
        }
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
        config.preferences.validate()?;

        Ok(config)
    }

    /// Load the stored configuration. `Ok(None)` if nothing was stored yet.
    pub fn load_from(store: &dyn KeyValueStore) -> Result<Option<Self>, ConfigError> {
        match store.get(CONFIG_STORAGE_KEY)? {
            Some(json) => {
                let config = Self::from_json(&json)?;
                log::info!("Loaded configuration");
                Ok(Some(config))
            }
            None => {
                log::debug!("No stored configuration");
                Ok(None)
            }
        }
    }

    /// Load the stored configuration, falling back to defaults on any problem.
    pub fn load_or_default(store: &dyn KeyValueStore) -> Self {
        match Self::load_from(store) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Failed to load configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Persist the configuration.
    pub fn save_to(&self, store: &mut dyn KeyValueStore) -> Result<(), ConfigError> {
        let json = self.to_json()?;
        store.set(CONFIG_STORAGE_KEY, &json)?;
        log::info!("Saved configuration");
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

    /// A preference holds a value the editor cannot work with
    #[error("Invalid preference {name}: {value}")]
    InvalidPreference { name: &'static str, value: f32 },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Storage error (localStorage in WASM)
    #[error("Storage error: {0}")]
    StorageError(String),
}
