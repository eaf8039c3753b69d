use std::str::FromStr;

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::catalog::Catalog;
use crate::error::{CatalogError, PlayerError, PlaylistError};
use crate::playback::{PlaybackDevice, Session};

/// Advance-selection policy for the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    Sequential,
    Shuffle,
    RepeatAll,
    RepeatOne,
}

impl PlayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayMode::Sequential => "sequential",
            PlayMode::Shuffle => "shuffle",
            PlayMode::RepeatAll => "repeat_all",
            PlayMode::RepeatOne => "repeat_one",
        }
    }
}

impl FromStr for PlayMode {
    type Err = PlaylistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(PlayMode::Sequential),
            "shuffle" => Ok(PlayMode::Shuffle),
            "repeat_all" => Ok(PlayMode::RepeatAll),
            "repeat_one" => Ok(PlayMode::RepeatOne),
            _ => Err(PlaylistError::InvalidMode {
                input: s.to_string(),
            }),
        }
    }
}

/// Outcome of a next/previous navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Playing(String),
    EndOfPlaylist,
    BeginningOfPlaylist,
}

/// Owns the ordered track list, current position, play mode and shuffle
/// permutation, and drives the playback device.
///
/// All mutation goes through one instance guarded by a mutex so caller
/// commands and the auto-advance poller cannot interleave.
pub struct PlayerEngine {
    catalog: Catalog,
    device: Box<dyn PlaybackDevice>,
    playlist: Vec<String>,
    position: Option<usize>,
    mode: PlayMode,
    shuffle_order: Vec<usize>,
    session: Session,
}

impl PlayerEngine {
    pub fn new(catalog: Catalog, device: Box<dyn PlaybackDevice>) -> Self {
        Self {
            catalog,
            device,
            playlist: Vec::new(),
            position: None,
            mode: PlayMode::Sequential,
            shuffle_order: Vec::new(),
            session: Session::default(),
        }
    }

    pub fn playlist(&self) -> &[String] {
        &self.playlist
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn shuffle_order(&self) -> &[usize] {
        &self.shuffle_order
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// List the catalog contents without touching the playlist.
    pub fn list_files(&self) -> Result<Vec<String>, CatalogError> {
        self.catalog.list_files()
    }

    /// Build the playlist from the full catalog, discarding prior playlist
    /// and position state. Mode persists across rebuilds except that
    /// `shuffle = true` switches into shuffle mode.
    pub fn build_playlist(&mut self, shuffle: bool) -> Result<(), PlayerError> {
        let files = self.catalog.list_files()?;
        if files.is_empty() {
            return Err(PlaylistError::EmptyCatalog.into());
        }

        self.playlist = files;
        self.position = Some(0);
        if shuffle {
            self.regenerate_shuffle_order(0);
            self.mode = PlayMode::Shuffle;
        } else {
            self.shuffle_order.clear();
        }
        info!(
            "playlist built: {} tracks, mode {}",
            self.playlist.len(),
            self.mode.as_str()
        );
        Ok(())
    }

    /// Switch the advance-selection policy. Entering shuffle with no
    /// permutation for the current playlist generates one; position is
    /// never reset.
    pub fn set_mode(&mut self, mode: PlayMode) {
        if mode == PlayMode::Shuffle && self.shuffle_order.len() != self.playlist.len() {
            let front = self.position.unwrap_or(0);
            self.regenerate_shuffle_order(front);
        }
        self.mode = mode;
        debug!("play mode set to {}", mode.as_str());
    }

    /// Play the playlist entry at `index`.
    ///
    /// The position is recorded before the device call, so a device failure
    /// surfaces with the index already updated. An out-of-range index leaves
    /// all state untouched.
    pub fn play_at(&mut self, index: usize) -> Result<String, PlayerError> {
        if self.playlist.is_empty() {
            return Err(PlaylistError::NoPlaylist.into());
        }
        if index >= self.playlist.len() {
            return Err(PlaylistError::IndexOutOfRange {
                index,
                len: self.playlist.len(),
            }
            .into());
        }

        self.position = Some(index);
        let name = self.playlist[index].clone();
        let path = self.catalog.resolve(&name)?;
        match self.device.load_and_play(&path) {
            Ok(()) => {
                self.session.mark_playing(name.clone());
                info!("playing track {} ({})", index, name);
                Ok(name)
            }
            Err(e) => {
                self.session.mark_stopped();
                Err(e.into())
            }
        }
    }

    /// Play a file by name, independent of the playlist. The playlist
    /// position is deliberately left alone.
    pub fn play_file(&mut self, name: &str) -> Result<String, PlayerError> {
        let path = self.catalog.resolve(name)?;
        match self.device.load_and_play(&path) {
            Ok(()) => {
                self.session.mark_playing(name.to_string());
                info!("playing file {}", name);
                Ok(name.to_string())
            }
            Err(e) => {
                self.session.mark_stopped();
                Err(e.into())
            }
        }
    }

    /// Advance to the next track per the current mode. "No next track" is a
    /// normal outcome, not an error, and mutates nothing.
    pub fn advance_to_next(&mut self) -> Result<Advance, PlayerError> {
        match self.next_index() {
            Some(index) => self.play_at(index).map(Advance::Playing),
            None => Ok(Advance::EndOfPlaylist),
        }
    }

    /// Step back to the previous track. Unlike forward navigation,
    /// repeat_one is not special-cased here; backward movement is uniform
    /// across the non-shuffle modes.
    pub fn advance_to_previous(&mut self) -> Result<Advance, PlayerError> {
        match self.previous_index() {
            Some(index) => self.play_at(index).map(Advance::Playing),
            None => Ok(Advance::BeginningOfPlaylist),
        }
    }

    /// Stop playback. Soft-fails when nothing is playing; the last played
    /// file is retained for status reporting.
    pub fn stop(&mut self) -> Result<String, PlayerError> {
        if !self.session.is_playing {
            return Err(crate::error::PlaybackError::NotPlaying.into());
        }
        self.device.stop();
        self.session.mark_stopped();
        Ok(self.session.current_file.clone().unwrap_or_default())
    }

    /// Composite status text: session line plus a playlist summary when a
    /// playlist exists.
    pub fn status(&self) -> String {
        let session_line = if self.session.is_playing && self.device.is_busy() {
            format!(
                "Playing: {}",
                self.session.current_file.as_deref().unwrap_or("?")
            )
        } else if let Some(file) = self.session.current_file.as_deref() {
            format!("Stopped (last played: {})", file)
        } else {
            "No music has been played yet".to_string()
        };

        if self.playlist.is_empty() {
            return session_line;
        }

        let position_display = self.position.map(|p| p + 1).unwrap_or(0);
        format!(
            "{}\nPlaylist: {} tracks, position {}/{}, mode {}",
            session_line,
            self.playlist.len(),
            position_display,
            self.playlist.len(),
            self.mode.as_str()
        )
    }

    /// One poller tick: if the session thinks we are playing but the device
    /// has gone idle, the track finished naturally - advance.
    pub fn poll_finished(&mut self) -> Option<Advance> {
        if !self.session.is_playing || self.device.is_busy() {
            return None;
        }
        self.session.mark_stopped();
        debug!("track finished, advancing");
        match self.advance_to_next() {
            Ok(advance) => Some(advance),
            Err(e) => {
                warn!("auto-advance failed: {}", e);
                None
            }
        }
    }

    fn next_index(&self) -> Option<usize> {
        if self.playlist.is_empty() {
            return None;
        }
        let pos = self.position?;
        match self.mode {
            PlayMode::RepeatOne => Some(pos),
            PlayMode::Shuffle => {
                // A lookup miss (stale permutation after a rebuild) means no
                // next track rather than a repaired permutation.
                let i = self.shuffle_order.iter().position(|&x| x == pos)?;
                let next = (i + 1) % self.shuffle_order.len();
                if next == 0 {
                    // Wrapped back to the start: shuffle does not auto-loop.
                    None
                } else {
                    Some(self.shuffle_order[next])
                }
            }
            PlayMode::Sequential => {
                if pos + 1 < self.playlist.len() {
                    Some(pos + 1)
                } else {
                    None
                }
            }
            PlayMode::RepeatAll => {
                if pos + 1 < self.playlist.len() {
                    Some(pos + 1)
                } else {
                    Some(0)
                }
            }
        }
    }

    fn previous_index(&self) -> Option<usize> {
        if self.playlist.is_empty() {
            return None;
        }
        let pos = self.position?;
        match self.mode {
            PlayMode::Shuffle => {
                let i = self.shuffle_order.iter().position(|&x| x == pos)?;
                if i == 0 {
                    None
                } else {
                    Some(self.shuffle_order[i - 1])
                }
            }
            _ => {
                if pos == 0 {
                    None
                } else {
                    Some(pos - 1)
                }
            }
        }
    }

    /// Generate a fresh uniform permutation of the playlist indices with
    /// `front` moved to the head, so a full shuffle walk starting from the
    /// current track visits every track exactly once.
    fn regenerate_shuffle_order(&mut self, front: usize) {
        self.shuffle_order = (0..self.playlist.len()).collect();
        self.shuffle_order.shuffle(&mut thread_rng());
        if let Some(i) = self.shuffle_order.iter().position(|&x| x == front) {
            self.shuffle_order.swap(0, i);
        }
    }
}
