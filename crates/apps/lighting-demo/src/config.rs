//! Demo configuration loaded from TOML
//!
//! Every section and field is optional. Load order: the `--config` path if
//! given, else [`DEFAULT_CONFIG_PATH`], else built-in defaults. A config that
//! cannot be read or parsed is logged and replaced by defaults.

use std::path::{Path, PathBuf};

use app::{AppConfig, FlyController};
use glam::Vec3;
use lighting::LightingState;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

/// Config file used when no `--config` is given
pub const DEFAULT_CONFIG_PATH: &str = "crates/apps/lighting-demo/config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Lighting".to_string(),
            width: 1080,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Units per second
    pub move_speed: f32,
    /// Degrees of field of view per scroll notch
    pub zoom_speed: f32,
    /// Degrees per pixel
    pub mouse_sensitivity: f32,
    /// Initial vertical field of view in degrees
    pub fov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            zoom_speed: 3.0,
            mouse_sensitivity: 0.1,
            fov: 60.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub background: Vec3,
    pub wireframe: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    /// Initial lighting state
    pub lighting: LightingState,
}

impl DemoConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the config to use; never fails
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(path) => path,
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if !default.exists() {
                    info!("No config at {DEFAULT_CONFIG_PATH}, using defaults");
                    return Self::default();
                }
                default
            }
        };

        match Self::from_file(path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e @ ConfigError::Read { .. }) => {
                warn!("{e}; using defaults");
                Self::default()
            }
            Err(e @ ConfigError::Parse { .. }) => {
                error!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn app_config(&self) -> AppConfig {
        AppConfig::new(self.window.title.clone()).with_size(self.window.width, self.window.height)
    }

    pub fn controller(&self) -> FlyController {
        FlyController {
            move_speed: self.camera.move_speed,
            mouse_sensitivity: self.camera.mouse_sensitivity,
            zoom_speed: self.camera.zoom_speed,
        }
    }
}
