use std::fs::File;
use std::path::Path;

use log::debug;
use rodio::mixer::Mixer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use crate::error::PlaybackError;

/// Playback device primitive: load-and-play a single file, stop it, and
/// report whether it is still sounding. Decoding and mixing live entirely
/// behind this trait.
pub trait PlaybackDevice: Send {
    fn load_and_play(&mut self, path: &Path) -> Result<(), PlaybackError>;

    fn stop(&mut self);

    /// True while the device is still producing audio for the loaded file.
    fn is_busy(&self) -> bool;
}

/// Record of which file is loaded and whether it is currently sounding.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub current_file: Option<String>,
    pub is_playing: bool,
}

impl Session {
    pub fn mark_playing(&mut self, file: String) {
        self.current_file = Some(file);
        self.is_playing = true;
    }

    pub fn mark_stopped(&mut self) {
        self.is_playing = false;
    }
}

/// Open the default output stream. The caller must keep the stream alive
/// for as long as playback is wanted; it is not Send, so it stays on the
/// main thread while the mixer handle travels with the device.
pub fn open_output_stream() -> Result<OutputStream, PlaybackError> {
    let mut stream = OutputStreamBuilder::from_default_device()
        .map_err(|e| PlaybackError::DeviceFailed(format!("no output device: {}", e)))?
        .open_stream_or_fallback()
        .map_err(|e| PlaybackError::DeviceFailed(format!("cannot open output stream: {}", e)))?;
    stream.log_on_drop(false);
    Ok(stream)
}

/// rodio-backed playback device built around a mixer handle.
pub struct RodioDevice {
    mixer: Mixer,
    sink: Sink,
}

impl RodioDevice {
    pub fn new(mixer: Mixer) -> Self {
        let sink = Sink::connect_new(&mixer);
        Self { mixer, sink }
    }
}

impl PlaybackDevice for RodioDevice {
    fn load_and_play(&mut self, path: &Path) -> Result<(), PlaybackError> {
        let file = File::open(path).map_err(|e| {
            PlaybackError::DeviceFailed(format!("cannot open {}: {}", path.display(), e))
        })?;
        let source = Decoder::try_from(file).map_err(|e| {
            PlaybackError::DeviceFailed(format!("cannot decode {}: {}", path.display(), e))
        })?;

        // Replace the sink so any previous track is discarded rather than queued.
        self.sink.stop();
        self.sink = Sink::connect_new(&self.mixer);
        self.sink.append(source);
        debug!("device playing {}", path.display());
        Ok(())
    }

    fn stop(&mut self) {
        self.sink.stop();
    }

    fn is_busy(&self) -> bool {
        !self.sink.empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut session = Session::default();
        assert!(session.current_file.is_none());
        assert!(!session.is_playing);

        session.mark_playing("a.mp3".to_string());
        assert_eq!(session.current_file.as_deref(), Some("a.mp3"));
        assert!(session.is_playing);

        session.mark_stopped();
        assert!(!session.is_playing);
        // Last played file is retained for status reporting.
        assert_eq!(session.current_file.as_deref(), Some("a.mp3"));
    }
}
