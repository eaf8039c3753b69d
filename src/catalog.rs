use std::fs;
use std::path::PathBuf;

use crate::error::{CatalogError, PlaybackError};

/// File catalog over the configured music folder.
///
/// The listing is recomputed from the directory on every query, never cached,
/// so files added or removed between calls are picked up immediately.
pub struct Catalog {
    folder: Option<PathBuf>,
}

impl Catalog {
    pub fn new(folder: Option<PathBuf>) -> Self {
        Self { folder }
    }

    /// List the MP3 file names in the music folder, sorted ascending.
    ///
    /// The scan is non-recursive. An existing folder with no matching files
    /// yields an empty list, not an error.
    pub fn list_files(&self) -> Result<Vec<String>, CatalogError> {
        let folder = self.folder.as_deref().ok_or(CatalogError::FolderNotSet)?;

        if !folder.is_dir() {
            return Err(CatalogError::FolderNotFound {
                path: folder.to_string_lossy().to_string(),
            });
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(folder)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_mp3 = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("mp3"))
                .unwrap_or(false);
            if !is_mp3 {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                files.push(name.to_string());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Resolve a file name from the catalog to its full path.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, PlayerResolveError> {
        let folder = self
            .folder
            .as_deref()
            .ok_or(PlayerResolveError::Catalog(CatalogError::FolderNotSet))?;

        let path = folder.join(name);
        if !path.is_file() {
            return Err(PlayerResolveError::Playback(PlaybackError::FileNotFound {
                name: name.to_string(),
            }));
        }
        Ok(path)
    }
}

/// Resolution can fail on either the configuration side or the file side.
#[derive(Debug)]
pub enum PlayerResolveError {
    Catalog(CatalogError),
    Playback(PlaybackError),
}

impl From<PlayerResolveError> for crate::error::PlayerError {
    fn from(err: PlayerResolveError) -> Self {
        match err {
            PlayerResolveError::Catalog(e) => e.into(),
            PlayerResolveError::Playback(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_file(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"dummy audio data").unwrap();
    }

    #[test]
    fn test_list_files_sorted() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "c.mp3");
        create_file(temp_dir.path(), "a.mp3");
        create_file(temp_dir.path(), "b.mp3");

        let catalog = Catalog::new(Some(temp_dir.path().to_path_buf()));
        let files = catalog.list_files().unwrap();
        assert_eq!(files, vec!["a.mp3", "b.mp3", "c.mp3"]);
    }

    #[test]
    fn test_list_files_filters_extension() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "song.mp3");
        create_file(temp_dir.path(), "song.MP3");
        create_file(temp_dir.path(), "readme.txt");
        create_file(temp_dir.path(), "noext");

        let catalog = Catalog::new(Some(temp_dir.path().to_path_buf()));
        let files = catalog.list_files().unwrap();
        assert_eq!(files, vec!["song.MP3", "song.mp3"]);
    }

    #[test]
    fn test_list_files_non_recursive() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "top.mp3");
        let subdir = temp_dir.path().join("subdir");
        fs::create_dir(&subdir).unwrap();
        create_file(&subdir, "nested.mp3");

        let catalog = Catalog::new(Some(temp_dir.path().to_path_buf()));
        let files = catalog.list_files().unwrap();
        assert_eq!(files, vec!["top.mp3"]);
    }

    #[test]
    fn test_list_files_empty_folder_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = Catalog::new(Some(temp_dir.path().to_path_buf()));
        assert!(catalog.list_files().unwrap().is_empty());
    }

    #[test]
    fn test_list_files_folder_not_set() {
        let catalog = Catalog::new(None);
        match catalog.list_files() {
            Err(CatalogError::FolderNotSet) => {}
            other => panic!("Expected FolderNotSet, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_list_files_folder_missing() {
        let catalog = Catalog::new(Some(PathBuf::from("/nonexistent/music")));
        match catalog.list_files() {
            Err(CatalogError::FolderNotFound { path }) => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("Expected FolderNotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_resolve_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        create_file(temp_dir.path(), "song.mp3");

        let catalog = Catalog::new(Some(temp_dir.path().to_path_buf()));
        let path = catalog.resolve("song.mp3").unwrap();
        assert_eq!(path, temp_dir.path().join("song.mp3"));
    }

    #[test]
    fn test_resolve_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = Catalog::new(Some(temp_dir.path().to_path_buf()));
        match catalog.resolve("ghost.mp3") {
            Err(PlayerResolveError::Playback(PlaybackError::FileNotFound { name })) => {
                assert_eq!(name, "ghost.mp3");
            }
            _ => panic!("Expected FileNotFound"),
        }
    }

    #[test]
    fn test_resolve_without_folder() {
        let catalog = Catalog::new(None);
        match catalog.resolve("song.mp3") {
            Err(PlayerResolveError::Catalog(CatalogError::FolderNotSet)) => {}
            _ => panic!("Expected FolderNotSet"),
        }
    }
}
