// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reverie - a narrative adventure in an old house.
//!
//! This binary is the cutscene shell: it wires the engine's channels to the
//! game's scene-state models and plays an authored cutscene by name.
//!
//! ```text
//! reverie [scene_name]   # defaults to memory_prologue; Enter skips
//! ```

mod audio;
mod channels;
mod config;
mod ticker;

use audio::MusicPlayer;
use channels::{
    AudioCueChannel, CameraChannel, LightingChannel, ParticleChannel, SharedOverlay, TextChannel,
};
use config::AppConfig;
use reverie_cutscene::{ChannelRegistry, ClockSource, EventKind, Sequence};
use reverie_script::{library, CutsceneScript};
use std::path::Path;
use std::sync::Arc;
use ticker::Ticker;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("reverie=info".parse().unwrap())
        .add_directive("reverie_cutscene=info".parse().unwrap());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("Starting Reverie v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_or_default(Path::new("reverie.ron"));

    let scene_name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "memory_prologue".to_string());
    let Some(script) = library::by_name(&scene_name) else {
        tracing::error!(scene = %scene_name, "unknown cutscene");
        eprintln!("Available scenes:");
        for scene in library::all() {
            eprintln!("  {}", scene.name);
        }
        std::process::exit(1);
    };

    play(&script, &config);
}

/// Wire up channels, clock, and skip input, then drive the scene to its end
fn play(script: &CutsceneScript, config: &AppConfig) {
    let overlay = SharedOverlay::default();

    let mut channels = ChannelRegistry::new();
    channels.register(
        EventKind::Text,
        Box::new(TextChannel::new(Arc::clone(&overlay))),
    );
    channels.register(EventKind::Particles, Box::new(ParticleChannel::new()));
    channels.register(EventKind::Camera, Box::new(CameraChannel::new()));
    channels.register(EventKind::Lighting, Box::new(LightingChannel::new()));
    channels.register(EventKind::AudioCue, Box::new(AudioCueChannel::new()));

    let clock = match &script.audio {
        Some(asset) => ClockSource::media(Box::new(MusicPlayer::new(
            config.assets_dir.join(asset),
        ))),
        None => ClockSource::wall(),
    };

    let mut sequence = Sequence::new(script.name.clone(), script.timeline(), clock, channels)
        .with_config(config.sequence)
        .with_completion(|reason| tracing::info!(?reason, "cutscene finished"))
        .with_degraded(|| tracing::info!("audio sync unavailable, continuing on wall clock"));

    // Enter skips; the handle is safe to poke from the input thread
    let control = sequence.control();
    std::thread::spawn(move || {
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_ok() {
            control.skip();
        }
    });

    println!("Playing '{}' ({:.0}s). Press Enter to skip.", script.name, script.duration());

    sequence.start();
    Ticker::new(config.tick_hz).run(&mut sequence);
}
