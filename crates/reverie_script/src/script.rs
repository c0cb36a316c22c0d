// SPDX-License-Identifier: MIT OR Apache-2.0
//! RON-serializable cutscene scripts.
//!
//! A script is the on-disk form of a cutscene: a name, an optional audio
//! clip for the media clock, an exit transition, and a list of beats. The
//! authoring layer converts it into an engine [`Timeline`] at load time.

use reverie_cutscene::{Event, EventPayload, ExitTransition, Timeline};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current script format version
pub const SCRIPT_FORMAT_VERSION: u32 = 1;

/// Error loading or validating a cutscene script
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// File could not be read or written
    #[error("script I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// RON could not be parsed
    #[error("script could not be parsed: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON could not be serialized
    #[error("script could not be serialized: {0}")]
    Serialize(#[from] ron::Error),

    /// Script was written by a newer game build
    #[error("script version {found} is newer than supported version {supported}")]
    Version {
        /// Version found in the file
        found: u32,
        /// Newest version this build understands
        supported: u32,
    },

    /// A beat has a negative timestamp
    #[error("beat {index} has negative timestamp {at}")]
    NegativeTimestamp {
        /// Beat position in declaration order
        index: usize,
        /// Offending timestamp
        at: f64,
    },
}

/// One timestamped beat of a script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beat {
    /// Time in seconds from sequence start
    pub at: f64,
    /// Effect payload
    pub payload: EventPayload,
}

/// Serializable cutscene definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutsceneScript {
    /// Format version, checked on load
    pub version: u32,
    /// Cutscene name
    pub name: String,
    /// Asset path of the backing audio clip, if the scene is audio-synced
    pub audio: Option<String>,
    /// Exit transition for the natural-end path
    pub exit: ExitTransition,
    /// Beats in declaration order
    pub beats: Vec<Beat>,
}

impl CutsceneScript {
    /// Create an empty script
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: SCRIPT_FORMAT_VERSION,
            name: name.into(),
            audio: None,
            exit: ExitTransition::default(),
            beats: Vec::new(),
        }
    }

    /// Parse a script from RON and validate it
    pub fn from_ron(content: &str) -> Result<Self, ScriptError> {
        let script: Self = ron::from_str(content)?;
        script.validate()?;
        Ok(script)
    }

    /// Serialize the script to pretty RON
    pub fn to_ron(&self) -> Result<String, ScriptError> {
        let config = ron::ser::PrettyConfig::default();
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load a script file
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        let script = Self::from_ron(&content)?;
        tracing::debug!(script = %script.name, beats = script.beats.len(), "script loaded");
        Ok(script)
    }

    /// Save the script to a file
    pub fn save(&self, path: &Path) -> Result<(), ScriptError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ScriptError> {
        if self.version > SCRIPT_FORMAT_VERSION {
            return Err(ScriptError::Version {
                found: self.version,
                supported: SCRIPT_FORMAT_VERSION,
            });
        }
        for (index, beat) in self.beats.iter().enumerate() {
            if beat.at < 0.0 {
                return Err(ScriptError::NegativeTimestamp {
                    index,
                    at: beat.at,
                });
            }
        }
        Ok(())
    }

    /// Total authored duration (time of the last beat)
    pub fn duration(&self) -> f64 {
        self.beats.iter().map(|b| b.at).fold(0.0, f64::max)
    }

    /// Convert the script into an engine timeline
    pub fn timeline(&self) -> Timeline {
        Timeline::with_exit(
            self.beats
                .iter()
                .map(|beat| Event::new(beat.at, beat.payload.clone()))
                .collect(),
            self.exit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reverie_cutscene::ExitStyle;

    fn sample() -> CutsceneScript {
        let mut script = CutsceneScript::new("test_scene");
        script.audio = Some("music/prologue.ogg".to_string());
        script.exit = ExitTransition {
            style: ExitStyle::FadeToWhite,
            duration: 2.0,
        };
        script.beats = vec![
            Beat {
                at: 0.0,
                payload: EventPayload::Camera {
                    shot: "bedroom_wide".to_string(),
                    blend: 0.0,
                },
            },
            Beat {
                at: 3.5,
                payload: EventPayload::Text {
                    line: "The morning light felt unfamiliar.".to_string(),
                },
            },
        ];
        script
    }

    #[test]
    fn test_ron_round_trip() {
        let script = sample();
        let ron_str = script.to_ron().unwrap();
        let loaded = CutsceneScript::from_ron(&ron_str).unwrap();
        assert_eq!(loaded.name, script.name);
        assert_eq!(loaded.audio, script.audio);
        assert_eq!(loaded.beats, script.beats);
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let mut script = sample();
        script.version = SCRIPT_FORMAT_VERSION + 1;
        let ron_str = script.to_ron().unwrap();
        assert!(matches!(
            CutsceneScript::from_ron(&ron_str),
            Err(ScriptError::Version { .. })
        ));
    }

    #[test]
    fn test_negative_timestamp_is_rejected() {
        let mut script = sample();
        script.beats[1].at = -0.5;
        let ron_str = script.to_ron().unwrap();
        assert!(matches!(
            CutsceneScript::from_ron(&ron_str),
            Err(ScriptError::NegativeTimestamp { index: 1, .. })
        ));
    }

    #[test]
    fn test_timeline_conversion_preserves_beats() {
        let script = sample();
        let timeline = script.timeline();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.duration(), 3.5);
        assert_eq!(timeline.exit().duration, 2.0);
    }
}
