// SPDX-License-Identifier: MIT OR Apache-2.0
//! Channel implementations backed by scene-state models.
//!
//! The timing core never renders anything itself; these channels maintain
//! the observable state the scene layer consumes (current overlay line,
//! camera shot, lighting preset) and log each applied effect.

use parking_lot::Mutex;
use reverie_cutscene::{Channel, EventPayload};
use std::sync::Arc;

/// Text overlay surface, shared between overlapping sequences
#[derive(Debug, Default)]
pub struct OverlayState {
    /// Line currently on screen, if any
    pub line: Option<String>,
}

/// Handle to the shared overlay surface
pub type SharedOverlay = Arc<Mutex<OverlayState>>;

/// Writes narration lines to the shared overlay
pub struct TextChannel {
    surface: SharedOverlay,
}

impl TextChannel {
    /// Create a channel writing to the given surface
    pub fn new(surface: SharedOverlay) -> Self {
        Self { surface }
    }
}

impl Channel for TextChannel {
    fn apply(&mut self, payload: &EventPayload) {
        if let EventPayload::Text { line } = payload {
            let mut overlay = self.surface.lock();
            if line.is_empty() {
                overlay.line = None;
                tracing::debug!("overlay cleared");
            } else {
                tracing::info!(%line, "overlay");
                overlay.line = Some(line.clone());
            }
        }
    }

    fn reset(&mut self) {
        // release this sequence's claim so the next one starts clean
        self.surface.lock().line = None;
    }
}

/// Tracks the active particle effect
#[derive(Default)]
pub struct ParticleChannel {
    active: Option<String>,
}

impl ParticleChannel {
    /// Create an idle particle channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the currently running effect
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }
}

impl Channel for ParticleChannel {
    fn apply(&mut self, payload: &EventPayload) {
        if let EventPayload::Particles { effect, intensity } = payload {
            tracing::info!(%effect, intensity, "particles");
            self.active = Some(effect.clone());
        }
    }

    fn reset(&mut self) {
        if self.active.take().is_some() {
            tracing::debug!("particles stopped");
        }
    }
}

/// Tracks the current camera shot
#[derive(Default)]
pub struct CameraChannel {
    shot: Option<String>,
}

impl CameraChannel {
    /// Create a camera channel with no shot selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the current shot
    pub fn current_shot(&self) -> Option<&str> {
        self.shot.as_deref()
    }
}

impl Channel for CameraChannel {
    fn apply(&mut self, payload: &EventPayload) {
        if let EventPayload::Camera { shot, blend } = payload {
            tracing::info!(%shot, blend, "camera");
            self.shot = Some(shot.clone());
        }
    }

    fn reset(&mut self) {
        self.shot = None;
    }
}

/// Tracks the current lighting preset
#[derive(Default)]
pub struct LightingChannel {
    preset: Option<String>,
}

impl LightingChannel {
    /// Create a lighting channel with no preset applied
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the active preset
    pub fn preset(&self) -> Option<&str> {
        self.preset.as_deref()
    }
}

impl Channel for LightingChannel {
    fn apply(&mut self, payload: &EventPayload) {
        if let EventPayload::Lighting { preset, fade } = payload {
            tracing::info!(%preset, fade, "lighting");
            self.preset = Some(preset.clone());
        }
    }

    fn reset(&mut self) {
        self.preset = None;
    }
}

/// Logs one-shot audio cues.
///
/// Cue playback shares the music backend's output device; until cue assets
/// ship, the channel records the last cue for the scene layer.
#[derive(Default)]
pub struct AudioCueChannel {
    last: Option<String>,
}

impl AudioCueChannel {
    /// Create an audio cue channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the most recent cue
    pub fn last_cue(&self) -> Option<&str> {
        self.last.as_deref()
    }
}

impl Channel for AudioCueChannel {
    fn apply(&mut self, payload: &EventPayload) {
        if let EventPayload::AudioCue { cue, volume } = payload {
            tracing::info!(%cue, volume, "audio cue");
            self.last = Some(cue.clone());
        }
    }

    fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reverie_cutscene::{
        ChannelRegistry, ClockSource, Event, EventKind, Sequence, SequenceState,
    };
    use reverie_cutscene::{ExitStyle, ExitTransition, Timeline};

    #[test]
    fn test_overlay_set_clear_reset() {
        let overlay = SharedOverlay::default();
        let mut channel = TextChannel::new(Arc::clone(&overlay));

        channel.apply(&EventPayload::Text {
            line: "The key still sticks.".to_string(),
        });
        assert_eq!(overlay.lock().line.as_deref(), Some("The key still sticks."));

        channel.apply(&EventPayload::Text {
            line: String::new(),
        });
        assert!(overlay.lock().line.is_none());

        channel.apply(&EventPayload::Text {
            line: "Again.".to_string(),
        });
        channel.reset();
        assert!(overlay.lock().line.is_none());
    }

    #[test]
    fn test_state_channels_track_last_applied() {
        let mut camera = CameraChannel::new();
        camera.apply(&EventPayload::Camera {
            shot: "attic_window".to_string(),
            blend: 2.0,
        });
        assert_eq!(camera.current_shot(), Some("attic_window"));

        let mut lighting = LightingChannel::new();
        lighting.apply(&EventPayload::Lighting {
            preset: "dawn".to_string(),
            fade: 6.0,
        });
        assert_eq!(lighting.preset(), Some("dawn"));

        let mut particles = ParticleChannel::new();
        particles.apply(&EventPayload::Particles {
            effect: "rain_on_glass".to_string(),
            intensity: 0.8,
        });
        assert_eq!(particles.active(), Some("rain_on_glass"));
        particles.reset();
        assert_eq!(particles.active(), None);
    }

    #[test]
    fn test_disposed_sequence_leaves_shared_overlay_clean() {
        let overlay = SharedOverlay::default();

        let timeline = Timeline::with_exit(
            vec![Event::new(
                0.0,
                EventPayload::Text {
                    line: "Left on screen".to_string(),
                },
            )],
            ExitTransition {
                style: ExitStyle::Cut,
                duration: 10.0,
            },
        );
        let mut channels = ChannelRegistry::new();
        channels.register(
            EventKind::Text,
            Box::new(TextChannel::new(Arc::clone(&overlay))),
        );
        let mut sequence = Sequence::new("overlay_owner", timeline, ClockSource::wall(), channels);

        sequence.start();
        sequence.tick(0.0);
        assert!(overlay.lock().line.is_some());

        // cancelled mid-display; the next sequence must not inherit the line
        sequence.cancel();
        assert_eq!(sequence.state(), SequenceState::Disposed);
        assert!(overlay.lock().line.is_none());
    }
}
