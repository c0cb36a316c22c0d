// SPDX-License-Identifier: MIT OR Apache-2.0
//! Music playback backing the media clock.
//!
//! With the "audio" feature enabled this uses rodio; the sequence clock
//! reads the sink position each tick. Without the feature a stub is
//! provided whose `play()` fails, which degrades the clock to wall time
//! through the engine's normal fallback path.

use reverie_cutscene::{AudioError, AudioHandle};
use std::path::PathBuf;

/// Plays a cutscene's backing track and reports its position
#[cfg(feature = "audio")]
pub struct MusicPlayer {
    path: PathBuf,
    _stream: Option<rodio::OutputStream>,
    sink: Option<rodio::Sink>,
}

#[cfg(feature = "audio")]
impl MusicPlayer {
    /// Create a player for the given audio file; nothing is opened until
    /// `play()` is called at sequence start
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _stream: None,
            sink: None,
        }
    }
}

#[cfg(feature = "audio")]
impl AudioHandle for MusicPlayer {
    fn play(&mut self) -> Result<(), AudioError> {
        let file = std::fs::File::open(&self.path)
            .map_err(|e| AudioError::Missing(format!("{}: {e}", self.path.display())))?;
        let (stream, handle) = rodio::OutputStream::try_default()
            .map_err(|e| AudioError::Device(e.to_string()))?;
        let sink = rodio::Sink::try_new(&handle).map_err(|e| AudioError::Device(e.to_string()))?;
        let source = rodio::Decoder::new(std::io::BufReader::new(file))
            .map_err(|e| AudioError::Decode(e.to_string()))?;

        sink.append(source);
        sink.play();
        tracing::info!(path = %self.path.display(), "music started");

        self._stream = Some(stream);
        self.sink = Some(sink);
        Ok(())
    }

    fn position(&self) -> f64 {
        self.sink
            .as_ref()
            .map(|s| s.get_pos().as_secs_f64())
            .unwrap_or(0.0)
    }

    fn has_ended(&self) -> bool {
        self.sink.as_ref().is_some_and(rodio::Sink::empty)
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self._stream = None;
    }
}

/// Stub player used when the "audio" feature is disabled
#[cfg(not(feature = "audio"))]
pub struct MusicPlayer {
    path: PathBuf,
}

#[cfg(not(feature = "audio"))]
impl MusicPlayer {
    /// Create a stub player; `play()` always fails so the clock falls back
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[cfg(not(feature = "audio"))]
impl AudioHandle for MusicPlayer {
    fn play(&mut self) -> Result<(), AudioError> {
        tracing::warn!(
            path = %self.path.display(),
            "built without the audio feature, music disabled"
        );
        Err(AudioError::Device("audio feature disabled".to_string()))
    }

    fn position(&self) -> f64 {
        0.0
    }

    fn has_ended(&self) -> bool {
        false
    }

    fn stop(&mut self) {}
}
