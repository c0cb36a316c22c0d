// SPDX-License-Identifier: MIT OR Apache-2.0
//! Maps clock time to the events that have newly become due.
//!
//! The scheduler is pure: it returns indices into the timeline and performs
//! no side effects itself, which keeps it unit-testable without a channel
//! registry or a clock.

use crate::event::Event;

/// Tracks which events have fired and emits each exactly once.
#[derive(Debug)]
pub struct Scheduler {
    /// Per-event fired flag, parallel to the timeline's event list
    fired: Vec<bool>,
    /// First index that may still be unfired
    cursor: usize,
}

impl Scheduler {
    /// Create a scheduler for a timeline with `event_count` events
    pub fn new(event_count: usize) -> Self {
        Self {
            fired: vec![false; event_count],
            cursor: 0,
        }
    }

    /// Return the indices of events newly due at `now`, in timestamp order
    /// (ties in declaration order), marking them fired.
    ///
    /// Idempotent per event: an already-fired event is never returned again,
    /// even if `now` repeats or transiently regresses during a clock-source
    /// switchover. A single call covering a large interval returns every
    /// event inside it.
    pub fn advance(&mut self, now: f64, events: &[Event]) -> Vec<usize> {
        let mut due = Vec::new();
        while self.cursor < events.len() && events[self.cursor].at <= now {
            if !self.fired[self.cursor] {
                self.fired[self.cursor] = true;
                due.push(self.cursor);
            }
            self.cursor += 1;
        }
        due
    }

    /// Mark every remaining event fired without returning it (the skip path)
    pub fn mark_all_fired(&mut self) {
        for flag in &mut self.fired {
            *flag = true;
        }
        self.cursor = self.fired.len();
    }

    /// Check whether every event has fired (timeline exhausted)
    pub fn all_fired(&self) -> bool {
        self.cursor >= self.fired.len()
    }

    /// Number of events fired so far
    pub fn fired_count(&self) -> usize {
        self.fired.iter().filter(|f| **f).count()
    }
}
