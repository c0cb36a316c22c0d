// SPDX-License-Identifier: MIT OR Apache-2.0
//! Effect channels and the dispatch table.
//!
//! Channels decouple the timing core from any rendering or audio technology:
//! the engine fires payloads at named sinks and never touches a surface
//! directly.

use crate::event::{Event, EventKind, EventPayload};
use indexmap::IndexMap;

/// A pluggable side-effect sink for one category of event
pub trait Channel {
    /// Apply an event payload as a visible or audible effect
    fn apply(&mut self, payload: &EventPayload);

    /// Clear any state the owning sequence left on this channel's surface.
    ///
    /// Called once when the sequence is disposed, so overlapping sequences
    /// sharing a surface never leave stale visuals behind.
    fn reset(&mut self) {}
}

/// Routes fired events to the channel registered for their kind
#[derive(Default)]
pub struct ChannelRegistry {
    channels: IndexMap<EventKind, Box<dyn Channel>>,
}

impl ChannelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the channel handling `kind`, replacing any previous one
    pub fn register(&mut self, kind: EventKind, channel: Box<dyn Channel>) {
        if self.channels.insert(kind, channel).is_some() {
            tracing::debug!(kind = kind.name(), "channel registration replaced");
        }
    }

    /// Dispatch one event to its channel.
    ///
    /// An event whose kind has no registered channel is dropped with a
    /// warning; authors may intentionally omit optional channels.
    pub fn dispatch(&mut self, event: &Event) {
        let kind = event.payload.kind();
        match self.channels.get_mut(&kind) {
            Some(channel) => channel.apply(&event.payload),
            None => {
                tracing::warn!(
                    kind = kind.name(),
                    at = event.at,
                    "no channel registered, dropping event"
                );
            }
        }
    }

    /// Reset every registered channel, releasing this sequence's claims
    pub fn reset_all(&mut self) {
        for channel in self.channels.values_mut() {
            channel.reset();
        }
    }

    /// Check whether a channel is registered for `kind`
    pub fn has(&self, kind: EventKind) -> bool {
        self.channels.contains_key(&kind)
    }

    /// Number of registered channels
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Check whether no channels are registered
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
