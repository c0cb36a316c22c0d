// SPDX-License-Identifier: MIT OR Apache-2.0
//! Narrative events and their payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Create a new random event ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

/// Category of effect an event drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Text overlay (narration, dialogue)
    Text,
    /// Particle effect
    Particles,
    /// Camera move
    Camera,
    /// Lighting change
    Lighting,
    /// One-shot audio cue
    AudioCue,
}

impl EventKind {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Particles => "Particles",
            Self::Camera => "Camera",
            Self::Lighting => "Lighting",
            Self::AudioCue => "AudioCue",
        }
    }
}

/// Payload carried by an event, dispatched to the channel registered for its kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventPayload {
    /// Show a line on the text overlay; an empty line clears it
    Text {
        /// Line to display
        line: String,
    },
    /// Spawn a particle effect
    Particles {
        /// Effect name (e.g. "dust_motes", "snowfall")
        effect: String,
        /// Emission intensity (0.0 to 1.0)
        intensity: f32,
    },
    /// Move or cut the camera to a named shot
    Camera {
        /// Shot name
        shot: String,
        /// Blend duration in seconds (0 for a hard cut)
        blend: f64,
    },
    /// Fade the lighting rig to a preset
    Lighting {
        /// Preset name (e.g. "dawn", "lamplight")
        preset: String,
        /// Fade duration in seconds
        fade: f64,
    },
    /// Play a one-shot audio cue
    AudioCue {
        /// Cue name
        cue: String,
        /// Volume (0.0 to 1.0)
        volume: f32,
    },
}

impl EventPayload {
    /// The channel kind this payload routes to
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Text { .. } => EventKind::Text,
            Self::Particles { .. } => EventKind::Particles,
            Self::Camera { .. } => EventKind::Camera,
            Self::Lighting { .. } => EventKind::Lighting,
            Self::AudioCue { .. } => EventKind::AudioCue,
        }
    }
}

/// A timestamped narrative beat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique event ID
    pub id: EventId,
    /// Time in seconds from sequence start
    pub at: f64,
    /// Payload applied when the event fires
    pub payload: EventPayload,
}

impl Event {
    /// Create a new event; negative timestamps are clamped to zero
    pub fn new(at: f64, payload: EventPayload) -> Self {
        Self {
            id: EventId::new(),
            at: at.max(0.0),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_kind_mapping() {
        let text = EventPayload::Text {
            line: "Hello".to_string(),
        };
        assert_eq!(text.kind(), EventKind::Text);

        let cue = EventPayload::AudioCue {
            cue: "door_creak".to_string(),
            volume: 0.8,
        };
        assert_eq!(cue.kind(), EventKind::AudioCue);
    }

    #[test]
    fn test_negative_timestamp_clamped() {
        let event = Event::new(
            -1.5,
            EventPayload::Text {
                line: String::new(),
            },
        );
        assert_eq!(event.at, 0.0);
    }
}
