use super::Result;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Tool defaults, loaded from `<config_dir>/utilkit/config.toml`. A missing
/// file means defaults; a malformed file is an error.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
    /// HTTP timeout for downloads, in seconds.
    pub http_timeout_secs: u64,
    /// Default rasterization resolution for PDF pages.
    pub default_dpi: u32,
    /// Default bounding size for thumbnails (applied to both axes).
    pub thumbnail_bound: u32,
    /// Whether `file delete` asks for confirmation by default.
    pub confirm_deletes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_timeout_secs: 30,
            default_dpi: 200,
            thumbnail_bound: 128,
            confirm_deletes: true,
        }
    }
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let content =
            toml::to_string(self).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        fs::write(&config_path, content).map_err(|source| ConfigError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("utilkit").join("config.toml"))
    }
}
