//! Configuration file support for the name visualizer.
//!
//! Every section has defaults, so a config file only needs the keys it
//! wants to change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HOVER_RADIUS, DEFAULT_WINDOW_SIZE};
use crate::label::{CurveStyle, MarkerStyle};
use crate::overlay::RenderBackend;
use crate::scene::{Camera, MeshSettings, Placement};

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

/// Window and presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Wait for vertical sync when presenting
    pub vsync: bool,
    /// Prefer the low power adapter
    pub low_power: bool,
    /// Background clear color (RGB, 0-1)
    pub clear_color: [f32; 3],
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Name Visualizer".to_string(),
            width: DEFAULT_WINDOW_SIZE.0,
            height: DEFAULT_WINDOW_SIZE.1,
            vsync: true,
            low_power: false,
            clear_color: [0.1, 0.1, 0.1],
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Log verbosity level
    pub log_level: LogLevel,

    pub window: WindowSettings,

    /// Label font file; searched for when unset
    pub font_path: Option<PathBuf>,

    /// Background image shown beneath the labels
    pub background_path: Option<PathBuf>,

    /// Curved text parameters
    pub label: CurveStyle,

    /// Dots marking every record on the image
    pub markers: MarkerStyle,

    /// Label cylinder shape and resting pose
    pub mesh: MeshSettings,

    pub camera: Camera,

    /// Where the cylinder goes for the active record
    pub placement: Placement,

    pub render_backend: RenderBackend,

    /// Flat ambient light multiplied into the label texture (RGBA, 0-1)
    pub ambient: [f32; 4],

    /// Cursor distance in pixels that counts as hovering a record
    pub hover_radius: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            window: WindowSettings::default(),
            font_path: None,
            background_path: None,
            label: CurveStyle::default(),
            markers: MarkerStyle::default(),
            mesh: MeshSettings::default(),
            camera: Camera::default(),
            placement: Placement::default(),
            render_backend: RenderBackend::default(),
            ambient: [1.0, 1.0, 1.0, 1.0],
            hover_radius: DEFAULT_HOVER_RADIUS,
        }
    }
}

impl AppConfig {
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

    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write the configuration, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "nameviz.json"
    }

    /// Get the default config file path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("nameviz").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home| {
                home.join(".config")
                    .join("nameviz")
                    .join(Self::default_filename())
            })
        }
    }

    /// Where to look for the config: an explicit path, else the default one.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit.map(Path::to_path_buf).or_else(Self::default_path)
    }

    /// Load the config from [`AppConfig::resolve_path`], falling back to
    /// defaults when it is missing or unusable.
    ///
    /// Nothing is logged here since this runs before the logger exists;
    /// the returned [`ConfigSource`] says what happened.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default(explicit: Option<&Path>) -> (Self, ConfigSource) {
        let Some(path) = Self::resolve_path(explicit) else {
            return (Self::default(), ConfigSource::Defaults { searched: None });
        };
        if !path.exists() {
            return (
                Self::default(),
                ConfigSource::Defaults {
                    searched: Some(path),
                },
            );
        }

        match Self::load(&path) {
            Ok(config) => (config, ConfigSource::Loaded(path)),
            Err(error) => (Self::default(), ConfigSource::Rejected { path, error }),
        }
    }

    /// GPU settings derived from the window section.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn gpu_config(&self) -> nameviz_gpu::GpuConfig {
        let config = if self.window.low_power {
            nameviz_gpu::GpuConfig::power_saving()
        } else {
            nameviz_gpu::GpuConfig::default()
        };
        let present_mode = if self.window.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        config.with_present_mode(present_mode)
    }
}

/// Where the active configuration came from.
#[derive(Debug)]
pub enum ConfigSource {
    /// No file; `searched` is where one was looked for
    Defaults { searched: Option<PathBuf> },
    /// Read from this file
    Loaded(PathBuf),
    /// A file exists but could not be used, so defaults apply
    Rejected { path: PathBuf, error: ConfigError },
}

impl ConfigSource {
    /// Log the outcome. Call once logging is initialized.
    pub fn report(&self) {
        match self {
            ConfigSource::Defaults { searched: Some(path) } => {
                log::debug!("No config file found at {:?}, using defaults", path)
            }
            ConfigSource::Defaults { searched: None } => {
                log::debug!("No config directory, using defaults")
            }
            ConfigSource::Loaded(path) => log::info!("Loaded configuration from {:?}", path),
            ConfigSource::Rejected { path, error } => {
                log::warn!("Ignoring config file {:?}: {}", path, error)
            }
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

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
    Io(#[from] std::io::Error),
}
