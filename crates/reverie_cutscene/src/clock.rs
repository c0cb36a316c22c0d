// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback clocks: wall time, or audio-derived time with wall fallback.
//!
//! A `MediaClock` mirrors the position of a playing audio clip so narrative
//! beats stay locked to the soundtrack. If the clip never starts reporting
//! progress within a grace window, the clock silently degrades to wall time
//! instead of stalling the cutscene.

use crate::config::SequenceConfig;

/// Error from the audio backend
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// Audio asset could not be found
    #[error("audio asset missing: {0}")]
    Missing(String),

    /// Audio asset could not be decoded
    #[error("audio asset could not be decoded: {0}")]
    Decode(String),

    /// Audio output device unavailable
    #[error("audio device unavailable: {0}")]
    Device(String),
}

/// Handle to an externally driven audio clip.
///
/// The clock only ever reads the position; it never blocks on the backend.
pub trait AudioHandle {
    /// Begin playback; fails if the resource is missing or undecodable
    fn play(&mut self) -> Result<(), AudioError>;

    /// Current playback position in seconds (0.0 until playback begins)
    fn position(&self) -> f64;

    /// Whether the clip has finished playing
    fn has_ended(&self) -> bool;

    /// Stop playback and release the clip
    fn stop(&mut self);
}

/// Time provider consulted once per tick
pub enum ClockSource {
    /// Elapsed wall time since `start()`
    Wall,
    /// Position of a playing audio clip, with wall fallback
    Media(MediaClock),
}

impl ClockSource {
    /// Create a wall-clock source
    pub fn wall() -> Self {
        Self::Wall
    }

    /// Create a media-clock source wrapping an audio handle
    pub fn media(handle: Box<dyn AudioHandle>) -> Self {
        Self::Media(MediaClock::new(handle))
    }

    /// Apply grace-window and drift tunables from the sequence config
    pub(crate) fn configure(&mut self, config: &SequenceConfig) {
        if let Self::Media(media) = self {
            media.grace = config.audio_grace;
            media.drift_tolerance = config.drift_tolerance;
        }
    }

    /// Request playback; a failed start degrades to wall time immediately
    pub(crate) fn begin(&mut self) {
        if let Self::Media(media) = self {
            if let Err(e) = media.handle.play() {
                tracing::warn!("audio failed to start, using wall clock: {e}");
                media.degraded = true;
            }
        }
    }

    /// Current playback time, given wall seconds elapsed since start
    pub(crate) fn current(&mut self, wall_elapsed: f64) -> f64 {
        match self {
            Self::Wall => wall_elapsed,
            Self::Media(media) => media.current(wall_elapsed),
        }
    }

    /// Whether the clock has fallen back from audio to wall time
    pub fn is_degraded(&self) -> bool {
        match self {
            Self::Wall => false,
            Self::Media(media) => media.degraded,
        }
    }

    /// Stop the underlying audio, if any
    pub(crate) fn stop(&mut self) {
        if let Self::Media(media) = self {
            media.handle.stop();
        }
    }
}

/// Audio-derived clock with single re-anchor and bounded-grace fallback
pub struct MediaClock {
    handle: Box<dyn AudioHandle>,
    grace: f64,
    drift_tolerance: f64,
    started: bool,
    degraded: bool,
    /// Anchor such that `wall_elapsed - base_offset` estimates playback time
    base_offset: f64,
}

impl MediaClock {
    fn new(handle: Box<dyn AudioHandle>) -> Self {
        let defaults = SequenceConfig::default();
        Self {
            handle,
            grace: defaults.audio_grace,
            drift_tolerance: defaults.drift_tolerance,
            started: false,
            degraded: false,
            base_offset: 0.0,
        }
    }

    fn current(&mut self, wall_elapsed: f64) -> f64 {
        if self.degraded {
            return (wall_elapsed - self.base_offset).max(0.0);
        }

        let pos = self.handle.position();

        if self.started {
            if pos <= 0.0 || self.handle.has_ended() {
                // Clip over before the timeline; continue on the wall estimate
                return (wall_elapsed - self.base_offset).max(0.0);
            }
            let estimate = wall_elapsed - self.base_offset;
            if (estimate - pos).abs() > self.drift_tolerance {
                tracing::debug!(
                    estimate,
                    position = pos,
                    "audio clock drift, re-anchoring base offset"
                );
                self.base_offset = wall_elapsed - pos;
            }
            pos
        } else if pos > 0.0 {
            // Audio began reporting progress: re-anchor once, then the
            // audio position is authoritative. This may regress the
            // reported time by at most the grace window; the scheduler
            // tolerates the backward jump.
            self.started = true;
            self.base_offset = wall_elapsed - pos;
            pos
        } else if wall_elapsed >= self.grace {
            tracing::warn!(
                grace = self.grace,
                "audio reported no progress within grace window, using wall clock"
            );
            self.degraded = true;
            wall_elapsed
        } else {
            // Inside the grace window: keep the timeline moving on wall time
            wall_elapsed
        }
    }
}
