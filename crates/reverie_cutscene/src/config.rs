// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine tuning knobs.

use serde::{Deserialize, Serialize};

/// Tuning parameters for sequence playback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Seconds to wait for audio progress before falling back to wall time
    pub audio_grace: f64,
    /// Divergence between audio position and wall estimate that triggers
    /// re-anchoring of the clock base offset
    pub drift_tolerance: f64,
    /// Exit transition duration used by `skip()`
    pub skip_exit: f64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            audio_grace: 0.75,
            drift_tolerance: 0.25,
            skip_exit: 0.4,
        }
    }
}
