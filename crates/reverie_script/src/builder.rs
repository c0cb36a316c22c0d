// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fluent construction of timelines in code.

use reverie_cutscene::{Event, EventPayload, ExitStyle, ExitTransition, Timeline};

/// Builder for authoring a timeline beat by beat
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    events: Vec<Event>,
    exit: ExitTransition,
}

impl TimelineBuilder {
    /// Create an empty builder with the default exit transition
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event with an explicit payload
    pub fn at(mut self, at: f64, payload: EventPayload) -> Self {
        self.events.push(Event::new(at, payload));
        self
    }

    /// Show a line on the text overlay
    pub fn text(self, at: f64, line: impl Into<String>) -> Self {
        self.at(at, EventPayload::Text { line: line.into() })
    }

    /// Clear the text overlay
    pub fn clear_text(self, at: f64) -> Self {
        self.at(
            at,
            EventPayload::Text {
                line: String::new(),
            },
        )
    }

    /// Spawn a particle effect
    pub fn particles(self, at: f64, effect: impl Into<String>, intensity: f32) -> Self {
        self.at(
            at,
            EventPayload::Particles {
                effect: effect.into(),
                intensity,
            },
        )
    }

    /// Move the camera to a named shot
    pub fn camera(self, at: f64, shot: impl Into<String>, blend: f64) -> Self {
        self.at(
            at,
            EventPayload::Camera {
                shot: shot.into(),
                blend,
            },
        )
    }

    /// Fade the lighting rig to a preset
    pub fn lighting(self, at: f64, preset: impl Into<String>, fade: f64) -> Self {
        self.at(
            at,
            EventPayload::Lighting {
                preset: preset.into(),
                fade,
            },
        )
    }

    /// Play a one-shot audio cue
    pub fn audio_cue(self, at: f64, cue: impl Into<String>, volume: f32) -> Self {
        self.at(
            at,
            EventPayload::AudioCue {
                cue: cue.into(),
                volume,
            },
        )
    }

    /// Set the exit transition for the natural-end path
    pub fn exit(mut self, style: ExitStyle, duration: f64) -> Self {
        self.exit = ExitTransition { style, duration };
        self
    }

    /// Build the immutable timeline
    pub fn build(self) -> Timeline {
        Timeline::with_exit(self.events, self.exit)
    }
}
