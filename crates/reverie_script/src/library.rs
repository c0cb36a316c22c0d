// SPDX-License-Identifier: MIT OR Apache-2.0
//! The game's authored cutscenes.
//!
//! Each function returns a complete [`CutsceneScript`]; the app layer picks
//! one, builds its timeline, and hands it to the engine. Scenes with an
//! `audio` path are synced to their soundtrack through the media clock.

use crate::script::{Beat, CutsceneScript};
use reverie_cutscene::{EventPayload, ExitStyle, ExitTransition};

fn text(at: f64, line: &str) -> Beat {
    Beat {
        at,
        payload: EventPayload::Text {
            line: line.to_string(),
        },
    }
}

fn clear(at: f64) -> Beat {
    Beat {
        at,
        payload: EventPayload::Text {
            line: String::new(),
        },
    }
}

fn camera(at: f64, shot: &str, blend: f64) -> Beat {
    Beat {
        at,
        payload: EventPayload::Camera {
            shot: shot.to_string(),
            blend,
        },
    }
}

fn lighting(at: f64, preset: &str, fade: f64) -> Beat {
    Beat {
        at,
        payload: EventPayload::Lighting {
            preset: preset.to_string(),
            fade,
        },
    }
}

fn particles(at: f64, effect: &str, intensity: f32) -> Beat {
    Beat {
        at,
        payload: EventPayload::Particles {
            effect: effect.to_string(),
            intensity,
        },
    }
}

fn cue(at: f64, name: &str, volume: f32) -> Beat {
    Beat {
        at,
        payload: EventPayload::AudioCue {
            cue: name.to_string(),
            volume,
        },
    }
}

/// Opening memory: a half-remembered evening, played over the prologue track
pub fn memory_prologue() -> CutsceneScript {
    CutsceneScript {
        version: crate::script::SCRIPT_FORMAT_VERSION,
        name: "memory_prologue".to_string(),
        audio: Some("music/prologue.ogg".to_string()),
        exit: ExitTransition {
            style: ExitStyle::FadeToWhite,
            duration: 3.0,
        },
        beats: vec![
            lighting(0.0, "memory_haze", 0.0),
            camera(0.0, "kitchen_doorway", 0.0),
            particles(0.5, "dust_motes", 0.3),
            text(2.0, "We used to talk in the kitchen, after everyone else had gone up."),
            clear(7.5),
            camera(8.0, "kitchen_table", 2.0),
            text(9.0, "She never finished her tea. I never mentioned it."),
            clear(14.5),
            lighting(15.0, "memory_fading", 4.0),
            text(16.0, "I keep coming back here. The room remembers more than I do."),
            cue(19.0, "clock_chime_distant", 0.4),
            clear(22.0),
        ],
    }
}

/// First morning: waking in the attic room, no audio track
pub fn first_wake() -> CutsceneScript {
    CutsceneScript {
        version: crate::script::SCRIPT_FORMAT_VERSION,
        name: "first_wake".to_string(),
        audio: None,
        exit: ExitTransition {
            style: ExitStyle::Cut,
            duration: 0.5,
        },
        beats: vec![
            lighting(0.0, "predawn", 0.0),
            camera(0.0, "attic_ceiling", 0.0),
            lighting(1.0, "dawn", 6.0),
            cue(2.5, "birdsong", 0.5),
            camera(4.0, "attic_window", 3.0),
            text(5.0, "Day one in the old house."),
            clear(9.0),
        ],
    }
}

/// Later morning: waking after the storm, shutters still rattling
pub fn second_wake() -> CutsceneScript {
    CutsceneScript {
        version: crate::script::SCRIPT_FORMAT_VERSION,
        name: "second_wake".to_string(),
        audio: None,
        exit: ExitTransition {
            style: ExitStyle::Cut,
            duration: 0.5,
        },
        beats: vec![
            lighting(0.0, "overcast", 0.0),
            camera(0.0, "attic_ceiling", 0.0),
            cue(0.5, "shutter_rattle", 0.6),
            particles(1.0, "rain_on_glass", 0.8),
            text(3.0, "The storm had argued with the house all night, and lost."),
            clear(8.0),
            camera(8.5, "attic_stairs", 2.5),
        ],
    }
}

/// Journal animation: the first entry writes itself across the page
pub fn journal_first_entry() -> CutsceneScript {
    CutsceneScript {
        version: crate::script::SCRIPT_FORMAT_VERSION,
        name: "journal_first_entry".to_string(),
        audio: Some("music/journal_theme.ogg".to_string()),
        exit: ExitTransition {
            style: ExitStyle::FadeToBlack,
            duration: 1.5,
        },
        beats: vec![
            camera(0.0, "journal_closeup", 0.0),
            lighting(0.0, "lamplight", 0.0),
            cue(0.5, "page_turn", 0.7),
            text(1.5, "Arrived before the movers. The key still sticks, like always."),
            clear(6.5),
            text(7.0, "Tomorrow: the attic. I have been putting it off for eleven years."),
            cue(11.0, "pen_scratch", 0.5),
            clear(12.0),
        ],
    }
}

/// Journal animation: the final entry, written the night before leaving
pub fn journal_final_entry() -> CutsceneScript {
    CutsceneScript {
        version: crate::script::SCRIPT_FORMAT_VERSION,
        name: "journal_final_entry".to_string(),
        audio: Some("music/journal_theme.ogg".to_string()),
        exit: ExitTransition {
            style: ExitStyle::FadeToBlack,
            duration: 2.0,
        },
        beats: vec![
            camera(0.0, "journal_closeup", 0.0),
            lighting(0.0, "lamplight_low", 0.0),
            cue(0.5, "page_turn", 0.7),
            text(1.5, "The house is sold. The boxes are labelled. The kitchen is just a kitchen."),
            clear(7.0),
            text(7.5, "I think she would have liked the people who are moving in."),
            clear(12.0),
            lighting(12.5, "lamp_out", 2.0),
        ],
    }
}

/// Ending credits, locked to the credits track
pub fn ending_credits() -> CutsceneScript {
    CutsceneScript {
        version: crate::script::SCRIPT_FORMAT_VERSION,
        name: "ending_credits".to_string(),
        audio: Some("music/credits.ogg".to_string()),
        exit: ExitTransition {
            style: ExitStyle::FadeToBlack,
            duration: 4.0,
        },
        beats: vec![
            lighting(0.0, "credits_black", 0.0),
            camera(0.0, "credits_card", 0.0),
            text(1.0, "REVERIE"),
            clear(5.0),
            text(6.0, "written and designed by the attic team"),
            clear(10.0),
            text(11.0, "character meshes grown from old photographs"),
            clear(15.0),
            text(16.0, "music recorded in the house itself"),
            clear(20.0),
            particles(21.0, "dust_motes", 0.2),
            text(22.0, "for everyone who kept a room the way it was"),
            clear(27.0),
        ],
    }
}

/// All authored cutscenes, in story order
pub fn all() -> Vec<CutsceneScript> {
    vec![
        memory_prologue(),
        first_wake(),
        journal_first_entry(),
        second_wake(),
        journal_final_entry(),
        ending_credits(),
    ]
}

/// Look up an authored cutscene by name
pub fn by_name(name: &str) -> Option<CutsceneScript> {
    all().into_iter().find(|s| s.name == name)
}
