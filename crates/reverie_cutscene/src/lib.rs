// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timed narrative sequence engine for Reverie.
//!
//! This crate drives scripted cutscenes: lists of timestamped narrative
//! events dispatched against a clock, kept in sync with an optionally
//! playing audio track.
//!
//! - Events fire exactly once, in timestamp order, even across coalesced
//!   or transiently regressed ticks
//! - Skip jumps to the end without firing intermediate effects
//! - Every exit path (natural end, skip, cancel, drop) releases acquired
//!   resources deterministically and fires the completion callback once
//!
//! ## Architecture
//!
//! The engine is built on:
//! - Immutable event timelines with per-kind payloads
//! - A pure scheduler with a fired-set
//! - Wall or audio-derived clock sources with bounded-grace fallback
//! - Pluggable effect channels behind a dispatch table
//! - A scoped resource lifecycle manager

pub mod channel;
pub mod clock;
pub mod config;
pub mod event;
pub mod resource;
pub mod scheduler;
pub mod sequence;
pub mod timeline;

pub use channel::{Channel, ChannelRegistry};
pub use clock::{AudioError, AudioHandle, ClockSource, MediaClock};
pub use config::SequenceConfig;
pub use event::{Event, EventId, EventKind, EventPayload};
pub use resource::{DisposeError, ResourceScope};
pub use scheduler::Scheduler;
pub use sequence::{CompletionReason, Sequence, SequenceControl, SequenceId, SequenceState};
pub use timeline::{ExitStyle, ExitTransition, Timeline};
