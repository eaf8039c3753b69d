use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Player configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub music_folder: Option<PathBuf>,
    pub poll_interval_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            music_folder: None,
            poll_interval_ms: 500,
        }
    }
}

/// Configuration manager for loading and saving settings
pub struct ConfigManager {
    config: PlayerConfig,
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path()?;
        let config = Self::load_config(&config_path).unwrap_or_default();

        Ok(Self {
            config,
            config_path,
        })
    }

    pub fn get_config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Resolve the music folder: the MUSIC_FOLDER environment variable wins,
    /// then the config file. Returns None when neither is set.
    pub fn resolve_music_folder(&self) -> Option<PathBuf> {
        if let Ok(folder) = std::env::var("MUSIC_FOLDER") {
            if !folder.is_empty() {
                return Some(PathBuf::from(folder));
            }
        }
        self.config.music_folder.clone()
    }

    pub fn set_music_folder(&mut self, folder: Option<PathBuf>) -> Result<(), ConfigError> {
        self.config.music_folder = folder;
        self.save_config()
    }

    pub fn set_poll_interval_ms(&mut self, interval: u64) -> Result<(), ConfigError> {
        self.config.poll_interval_ms = interval.max(1);
        self.save_config()
    }

    fn get_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::home_dir()
            .ok_or(ConfigError::ConfigDirNotFound)?
            .join(".config")
            .join("mp3-folder-player");

        std::fs::create_dir_all(&config_dir).map_err(ConfigError::IoError)?;

        Ok(config_dir.join("config.toml"))
    }

    fn load_config(path: &Path) -> Result<PlayerConfig, ConfigError> {
        if !path.exists() {
            return Ok(PlayerConfig::default());
        }

        let config_content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;

        let config: PlayerConfig =
            toml::from_str(&config_content).map_err(ConfigError::DeserializationError)?;

        Ok(config)
    }

    fn save_config(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::IoError)?;
        }

        let config_content =
            toml::to_string_pretty(&self.config).map_err(ConfigError::SerializationError)?;

        std::fs::write(&self.config_path, config_content).map_err(ConfigError::IoError)?;

        Ok(())
    }
}
