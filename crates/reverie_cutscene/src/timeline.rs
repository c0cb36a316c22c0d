// SPDX-License-Identifier: MIT OR Apache-2.0
//! Immutable, ordered event timelines.

use crate::event::Event;
use serde::{Deserialize, Serialize};

/// Visual style of an exit transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExitStyle {
    /// Fade the scene to black
    #[default]
    FadeToBlack,
    /// Fade the scene to white
    FadeToWhite,
    /// Hard cut, no fade
    Cut,
}

/// Transition played when a sequence reaches its natural end
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExitTransition {
    /// Transition style
    pub style: ExitStyle,
    /// Duration in seconds
    pub duration: f64,
}

impl Default for ExitTransition {
    fn default() -> Self {
        Self {
            style: ExitStyle::FadeToBlack,
            duration: 1.0,
        }
    }
}

/// Ordered, immutable list of timestamped events for one sequence.
///
/// Events may be supplied in any order; the constructor stable-sorts them by
/// timestamp, so events sharing a timestamp keep their declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    events: Vec<Event>,
    exit: ExitTransition,
}

impl Timeline {
    /// Create a timeline with the default exit transition
    pub fn new(events: Vec<Event>) -> Self {
        Self::with_exit(events, ExitTransition::default())
    }

    /// Create a timeline with an authored exit transition
    pub fn with_exit(mut events: Vec<Event>, exit: ExitTransition) -> Self {
        events.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self { events, exit }
    }

    /// Get all events in firing order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get event count
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check whether the timeline has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get the duration (time of the last event)
    pub fn duration(&self) -> f64 {
        self.events.last().map(|e| e.at).unwrap_or(0.0)
    }

    /// Get the exit transition for the natural-end path
    pub fn exit(&self) -> ExitTransition {
        self.exit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventPayload;

    fn text(at: f64, line: &str) -> Event {
        Event::new(
            at,
            EventPayload::Text {
                line: line.to_string(),
            },
        )
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let timeline = Timeline::new(vec![text(5.0, "b"), text(1.0, "a"), text(9.0, "c")]);
        let times: Vec<f64> = timeline.events().iter().map(|e| e.at).collect();
        assert_eq!(times, vec![1.0, 5.0, 9.0]);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let timeline = Timeline::new(vec![text(2.0, "first"), text(2.0, "second")]);
        let lines: Vec<&str> = timeline
            .events()
            .iter()
            .map(|e| match &e.payload {
                EventPayload::Text { line } => line.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_duration_is_last_timestamp() {
        let timeline = Timeline::new(vec![text(0.0, "a"), text(12.5, "b")]);
        assert_eq!(timeline.duration(), 12.5);
        assert_eq!(Timeline::new(Vec::new()).duration(), 0.0);
    }
}
