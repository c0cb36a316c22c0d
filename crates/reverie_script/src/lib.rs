// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cutscene authoring for Reverie.
//!
//! This crate provides the layer between narrative writing and the
//! `reverie_cutscene` engine:
//! - A fluent [`TimelineBuilder`] for scenes authored in code
//! - A RON script format ([`CutsceneScript`]) for scenes authored as data
//! - The game's scene library ([`library`])

pub mod builder;
pub mod library;
pub mod script;

pub use builder::TimelineBuilder;
pub use script::{Beat, CutsceneScript, ScriptError, SCRIPT_FORMAT_VERSION};
