// SPDX-License-Identifier: MIT OR Apache-2.0
//! Runtime settings loaded from `reverie.ron`.

use reverie_cutscene::SequenceConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// App-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Engine playback tuning
    pub sequence: SequenceConfig,
    /// Root directory for audio and other assets
    pub assets_dir: PathBuf,
    /// Logical tick rate in Hz
    pub tick_hz: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sequence: SequenceConfig::default(),
            assets_dir: PathBuf::from("assets"),
            tick_hz: 60.0,
        }
    }
}

impl AppConfig {
    /// Load settings from a RON file
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = ron::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(config)
    }

    /// Load settings, falling back to defaults when the file is missing
    /// or malformed
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "config unreadable ({e}), using defaults");
                Self::default()
            }
        }
    }
}
