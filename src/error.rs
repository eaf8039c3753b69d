use thiserror::Error;

/// Main player error type
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Playlist error: {0}")]
    Playlist(#[from] PlaylistError),

    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CLI parse error: {0}")]
    Parse(#[from] crate::cli::ParseError),
}

impl PlayerError {
    /// Get user-friendly error message for the caller-facing text boundary
    pub fn user_message(&self) -> String {
        match self {
            PlayerError::Catalog(err) => err.user_message(),
            PlayerError::Playlist(err) => err.user_message(),
            PlayerError::Playback(err) => err.user_message(),
            PlayerError::Config(err) => err.user_message(),
            PlayerError::Parse(err) => format!("Command error: {}", err),
        }
    }

    /// Get error severity level for logging
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PlayerError::Catalog(CatalogError::FolderNotSet) => ErrorSeverity::Warning,
            PlayerError::Catalog(_) => ErrorSeverity::Error,
            PlayerError::Playlist(PlaylistError::EmptyCatalog) => ErrorSeverity::Info,
            PlayerError::Playlist(_) => ErrorSeverity::Warning,
            PlayerError::Playback(PlaybackError::NotPlaying) => ErrorSeverity::Info,
            PlayerError::Playback(_) => ErrorSeverity::Error,
            PlayerError::Config(_) => ErrorSeverity::Warning,
            PlayerError::Parse(_) => ErrorSeverity::Info,
        }
    }
}

/// Error severity levels for logging and user feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
}

impl ErrorSeverity {
    pub fn log_level(&self) -> log::Level {
        match self {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error => log::Level::Error,
        }
    }
}

/// File catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Music folder not set")]
    FolderNotSet,

    #[error("Music folder does not exist: {path}")]
    FolderNotFound { path: String },

    #[error("Cannot read music folder: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::FolderNotSet => {
                "Error: Music folder not set - set MUSIC_FOLDER or the config file".to_string()
            }
            CatalogError::FolderNotFound { path } => {
                format!("Error: Music folder does not exist: {}", path)
            }
            CatalogError::Io(err) => {
                format!("Error reading music folder: {}", err)
            }
        }
    }
}

/// Playlist engine errors
#[derive(Debug, Error)]
pub enum PlaylistError {
    #[error("No MP3 files found in the music folder")]
    EmptyCatalog,

    #[error("No playlist loaded")]
    NoPlaylist,

    #[error("Track index {index} out of range (playlist has {len} tracks)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid play mode: {input}")]
    InvalidMode { input: String },
}

impl PlaylistError {
    pub fn user_message(&self) -> String {
        match self {
            PlaylistError::EmptyCatalog => {
                "No MP3 files found in the music folder".to_string()
            }
            PlaylistError::NoPlaylist => {
                "No playlist loaded - use 'playall' to build one first".to_string()
            }
            PlaylistError::IndexOutOfRange { index, len } => {
                format!(
                    "Track number {} is not valid - playlist has {} tracks",
                    index + 1,
                    len
                )
            }
            PlaylistError::InvalidMode { input } => {
                format!(
                    "Invalid mode '{}'. Valid modes: sequential, shuffle, repeat_all, repeat_one",
                    input
                )
            }
        }
    }
}

/// Playback device and session errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("File not found: {name}")]
    FileNotFound { name: String },

    #[error("Device failure: {0}")]
    DeviceFailed(String),

    #[error("No music is currently playing")]
    NotPlaying,
}

impl PlaybackError {
    pub fn user_message(&self) -> String {
        match self {
            PlaybackError::FileNotFound { name } => {
                format!("Error: File not found: {}", name)
            }
            PlaybackError::DeviceFailed(msg) => {
                format!("Error playing file: {}", msg)
            }
            PlaybackError::NotPlaying => "No music is currently playing".to_string(),
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    ConfigDirNotFound,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] toml::ser::Error),

    #[error("Deserialization error: {0}")]
    DeserializationError(#[from] toml::de::Error),
}

impl ConfigError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::ConfigDirNotFound => {
                "Cannot find or create configuration directory".to_string()
            }
            ConfigError::IoError(err) => {
                format!("Cannot access configuration file: {}", err)
            }
            ConfigError::SerializationError(_) => {
                "Failed to save configuration settings".to_string()
            }
            ConfigError::DeserializationError(_) => {
                "Configuration file is corrupted or has invalid format".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_player_error_from_catalog_error() {
        let player_error: PlayerError = CatalogError::FolderNotSet.into();
        match player_error {
            PlayerError::Catalog(CatalogError::FolderNotSet) => {}
            _ => panic!("Expected Catalog error variant"),
        }
    }

    #[test]
    fn test_player_error_from_playlist_error() {
        let player_error: PlayerError = PlaylistError::EmptyCatalog.into();
        match player_error {
            PlayerError::Playlist(PlaylistError::EmptyCatalog) => {}
            _ => panic!("Expected Playlist error variant"),
        }
    }

    #[test]
    fn test_player_error_from_playback_error() {
        let player_error: PlayerError = PlaybackError::NotPlaying.into();
        match player_error {
            PlayerError::Playback(PlaybackError::NotPlaying) => {}
            _ => panic!("Expected Playback error variant"),
        }
    }

    #[test]
    fn test_catalog_error_display() {
        let error = CatalogError::FolderNotSet;
        assert_eq!(format!("{}", error), "Music folder not set");

        let error = CatalogError::FolderNotFound {
            path: "/missing/music".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Music folder does not exist: /missing/music"
        );
    }

    #[test]
    fn test_playlist_error_display() {
        let error = PlaylistError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(
            format!("{}", error),
            "Track index 5 out of range (playlist has 3 tracks)"
        );

        let error = PlaylistError::InvalidMode {
            input: "bogus".to_string(),
        };
        assert_eq!(format!("{}", error), "Invalid play mode: bogus");
    }

    #[test]
    fn test_invalid_mode_message_lists_valid_modes() {
        let error = PlaylistError::InvalidMode {
            input: "bogus".to_string(),
        };
        let msg = error.user_message();
        assert!(msg.contains("bogus"));
        assert!(msg.contains("sequential"));
        assert!(msg.contains("shuffle"));
        assert!(msg.contains("repeat_all"));
        assert!(msg.contains("repeat_one"));
    }

    #[test]
    fn test_playback_error_messages() {
        let error = PlaybackError::FileNotFound {
            name: "song.mp3".to_string(),
        };
        assert_eq!(error.user_message(), "Error: File not found: song.mp3");

        let error = PlaybackError::DeviceFailed("no output stream".to_string());
        assert_eq!(error.user_message(), "Error playing file: no output stream");

        let error = PlaybackError::NotPlaying;
        assert_eq!(error.user_message(), "No music is currently playing");
    }

    #[test]
    fn test_severity_mapping() {
        let soft: PlayerError = PlaybackError::NotPlaying.into();
        assert_eq!(soft.severity(), ErrorSeverity::Info);

        let warn: PlayerError = CatalogError::FolderNotSet.into();
        assert_eq!(warn.severity(), ErrorSeverity::Warning);

        let hard: PlayerError = PlaybackError::DeviceFailed("boom".to_string()).into();
        assert_eq!(hard.severity(), ErrorSeverity::Error);
        assert_eq!(hard.severity().log_level(), log::Level::Error);
    }

    #[test]
    fn test_config_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied");
        let config_error: ConfigError = io_error.into();
        match config_error {
            ConfigError::IoError(_) => {}
            _ => panic!("Expected IoError variant"),
        }
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let io_error = io::Error::new(io::ErrorKind::NotFound, "not found");
        let catalog_error = CatalogError::Io(io_error);
        let player_error = PlayerError::Catalog(catalog_error);

        let mut current_error: &dyn Error = &player_error;
        let mut error_count = 0;
        while let Some(source) = current_error.source() {
            current_error = source;
            error_count += 1;
        }
        assert!(error_count >= 1);
    }
}
