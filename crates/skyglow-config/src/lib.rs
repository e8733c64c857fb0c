//! Configuration for skyglow.
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/skyglow/` on Linux). A missing file means defaults; values out
//! of range are clamped rather than rejected.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use skyglow_core::{AnimationSpeed, SceneKind};
use thiserror::Error;
use tracing::{debug, info};

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Name of the log file inside the data directory.
pub const LOG_FILE: &str = "skyglow.log";

const MIN_FPS: u32 = 1;
const MAX_FPS: u32 = 240;

/// Errors that can occur while loading or saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a configuration directory for this platform")]
    NoConfigDir,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scene shown at startup.
    pub scene: SceneKind,
    /// Animation playback speed.
    pub speed: AnimationSpeed,
    /// Target frames per second.
    pub fps: u32,
    /// Width of one terminal cell in virtual pixels.
    pub cell_width: u16,
    /// Height of one terminal cell in virtual pixels.
    pub cell_height: u16,
    /// Show the key help line at the bottom.
    pub show_help: bool,
    /// Capture the mouse so hovering a module highlights it.
    pub mouse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: SceneKind::default(),
            speed: AnimationSpeed::default(),
            fps: 60,
            cell_width: 8,
            cell_height: 16,
            show_help: true,
            mouse: true,
        }
    }
}

impl Config {
    /// Clamp every value into its supported range.
    pub fn sanitized(mut self) -> Self {
        self.fps = self.fps.clamp(MIN_FPS, MAX_FPS);
        self.cell_width = self.cell_width.max(1);
        self.cell_height = self.cell_height.max(1);
        self
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str, path: &Path) -> ConfigResult<Self> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Load configuration from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                debug!(path = %path.display(), "loaded configuration");
                Self::from_toml(&text, path)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load configuration from the platform config directory.
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&config_path()?)
    }

    /// Write configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write configuration to the platform config directory.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&config_path()?)
    }
}

fn project_dirs() -> ConfigResult<ProjectDirs> {
    ProjectDirs::from("", "", "skyglow").ok_or(ConfigError::NoConfigDir)
}

/// Path of the configuration file.
pub fn config_path() -> ConfigResult<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
}

/// Directory for the log file.
pub fn data_dir() -> ConfigResult<PathBuf> {
    Ok(project_dirs()?.data_local_dir().to_path_buf())
}
