// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback lifecycle for one cutscene run.
//!
//! A [`Sequence`] aggregates a timeline, a clock source, and channel
//! bindings, and owns the `Idle -> Playing -> Completing -> Disposed` state
//! machine. It is single-use: once disposed it cannot be restarted.

use crate::channel::{Channel, ChannelRegistry};
use crate::clock::ClockSource;
use crate::config::SequenceConfig;
use crate::event::EventKind;
use crate::resource::{DisposeError, ResourceScope};
use crate::scheduler::Scheduler;
use crate::timeline::Timeline;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceId(pub Uuid);

impl SequenceId {
    /// Create a new random sequence ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SequenceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle state of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceState {
    /// Constructed, not yet started
    #[default]
    Idle,
    /// Ticking and dispatching events
    Playing,
    /// Timeline over, exit transition running
    Completing,
    /// Resources released; terminal
    Disposed,
}

/// Why playback ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionReason {
    /// The timeline ran to its end
    NaturalEnd,
    /// The player skipped ahead
    Skipped,
    /// The owner cancelled playback
    Cancelled,
}

/// Cloneable handle for requesting skip or cancel from outside the tick.
///
/// The host UI's skip key and effect channels both hold one of these; the
/// request takes effect at the next signal poll inside [`Sequence::tick`],
/// which makes a skip raised from inside a channel callback safe.
#[derive(Clone)]
pub struct SequenceControl {
    skip: Arc<AtomicBool>,
    cancel: Arc<AtomicBool>,
}

impl SequenceControl {
    fn new() -> Self {
        Self {
            skip: Arc::new(AtomicBool::new(false)),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request a skip to the end of the sequence
    pub fn skip(&self) {
        self.skip.store(true, Ordering::Relaxed);
    }

    /// Request immediate cancellation
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

type CompleteFn = Box<dyn FnOnce(CompletionReason)>;
type DegradedFn = Box<dyn FnOnce()>;

/// One playthrough instance of a scripted cutscene
pub struct Sequence {
    id: SequenceId,
    name: String,
    timeline: Timeline,
    clock: ClockSource,
    channels: ChannelRegistry,
    scheduler: Scheduler,
    resources: ResourceScope,
    config: SequenceConfig,
    state: SequenceState,
    /// Wall seconds accumulated since `start()`
    wall_elapsed: f64,
    /// Clock time observed on the most recent playing tick
    last_known_time: f64,
    /// Seconds left of the exit transition while completing
    exit_remaining: f64,
    pending_reason: Option<CompletionReason>,
    on_complete: Option<CompleteFn>,
    on_degraded: Option<DegradedFn>,
    degraded_seen: bool,
    signals: SequenceControl,
}

impl Sequence {
    /// Create a sequence from a timeline, clock, and channel bindings.
    ///
    /// The registry is owned by the sequence from here on; further channels
    /// may be added with [`Sequence::register_channel`] until `start()`.
    pub fn new(
        name: impl Into<String>,
        timeline: Timeline,
        clock: ClockSource,
        channels: ChannelRegistry,
    ) -> Self {
        let scheduler = Scheduler::new(timeline.len());
        let mut sequence = Self {
            id: SequenceId::new(),
            name: name.into(),
            timeline,
            clock,
            channels,
            scheduler,
            resources: ResourceScope::new(),
            config: SequenceConfig::default(),
            state: SequenceState::Idle,
            wall_elapsed: 0.0,
            last_known_time: 0.0,
            exit_remaining: 0.0,
            pending_reason: None,
            on_complete: None,
            on_degraded: None,
            degraded_seen: false,
            signals: SequenceControl::new(),
        };
        sequence.clock.configure(&sequence.config);
        sequence
    }

    /// Override the playback tuning
    pub fn with_config(mut self, config: SequenceConfig) -> Self {
        self.config = config;
        self.clock.configure(&self.config);
        self
    }

    /// Set the completion callback; invoked exactly once per lifetime,
    /// never if `start()` is never called
    pub fn with_completion(mut self, f: impl FnOnce(CompletionReason) + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Set the degraded-mode callback; invoked at most once, when the clock
    /// falls back from audio to wall time
    pub fn with_degraded(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_degraded = Some(Box::new(f));
        self
    }

    /// Get the sequence ID
    pub fn id(&self) -> SequenceId {
        self.id
    }

    /// Get the sequence name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the current lifecycle state
    pub fn state(&self) -> SequenceState {
        self.state
    }

    /// Clock time observed on the most recent playing tick
    pub fn current_time(&self) -> f64 {
        self.last_known_time
    }

    /// Whether the clock has fallen back to wall time
    pub fn is_degraded(&self) -> bool {
        self.clock.is_degraded()
    }

    /// Get a cloneable skip/cancel handle for the host UI or channels
    pub fn control(&self) -> SequenceControl {
        self.signals.clone()
    }

    /// Register a channel binding. Must happen before `start()`; later
    /// registrations are logged and ignored.
    pub fn register_channel(&mut self, kind: EventKind, channel: Box<dyn Channel>) {
        if self.state != SequenceState::Idle {
            tracing::warn!(sequence = %self.name, kind = kind.name(), "channel registered after start(), ignored");
            return;
        }
        self.channels.register(kind, channel);
    }

    /// Register an externally acquired resource (timer, listener) for
    /// release at disposal
    pub fn claim(
        &mut self,
        label: impl Into<String>,
        release: impl FnOnce() -> Result<(), DisposeError> + 'static,
    ) {
        self.resources.register(label, release);
    }

    /// Begin playback. Logs and does nothing if the sequence is not idle.
    pub fn start(&mut self) {
        if self.state != SequenceState::Idle {
            tracing::warn!(sequence = %self.name, state = ?self.state, "start() ignored");
            return;
        }
        self.state = SequenceState::Playing;
        self.wall_elapsed = 0.0;
        self.clock.begin();
        tracing::info!(
            sequence = %self.name,
            events = self.timeline.len(),
            "cutscene started"
        );
    }

    /// Advance playback by `dt` wall seconds.
    ///
    /// Called once per frame by the host's tick signal. All channel
    /// dispatches for the tick run synchronously before this returns.
    pub fn tick(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        match self.state {
            SequenceState::Idle | SequenceState::Disposed => {}
            SequenceState::Completing => {
                self.wall_elapsed += dt;
                self.poll_signals();
                if self.state != SequenceState::Completing {
                    return;
                }
                self.exit_remaining -= dt;
                if self.exit_remaining <= 0.0 {
                    let reason = self
                        .pending_reason
                        .take()
                        .unwrap_or(CompletionReason::NaturalEnd);
                    self.dispose(Some(reason));
                }
            }
            SequenceState::Playing => {
                self.wall_elapsed += dt;
                self.poll_signals();
                if self.state != SequenceState::Playing {
                    return;
                }

                let now = self.clock.current(self.wall_elapsed);
                self.last_known_time = now;
                if self.clock.is_degraded() && !self.degraded_seen {
                    self.degraded_seen = true;
                    tracing::info!(sequence = %self.name, "running without audio sync");
                    if let Some(f) = self.on_degraded.take() {
                        f();
                    }
                }

                let due = self.scheduler.advance(now, self.timeline.events());
                for index in due {
                    self.channels.dispatch(&self.timeline.events()[index]);
                    // a channel may have requested skip/cancel via its handle
                    self.poll_signals();
                    if self.state != SequenceState::Playing {
                        return;
                    }
                }

                if self.scheduler.all_fired() {
                    let exit = self.timeline.exit();
                    self.begin_completing(CompletionReason::NaturalEnd, exit.duration);
                }
            }
        }
    }

    /// Skip to the end: remaining events are marked fired without their
    /// effects, then the fixed skip exit transition runs.
    ///
    /// A no-op when already completing or disposed.
    pub fn skip(&mut self) {
        match self.state {
            SequenceState::Playing => {
                tracing::info!(sequence = %self.name, at = self.last_known_time, "skipped");
                self.scheduler.mark_all_fired();
                self.begin_completing(CompletionReason::Skipped, self.config.skip_exit);
            }
            SequenceState::Completing | SequenceState::Disposed => {
                tracing::debug!(sequence = %self.name, "skip() ignored, already ending");
            }
            SequenceState::Idle => {
                tracing::warn!(sequence = %self.name, "skip() before start(), ignored");
            }
        }
    }

    /// Cancel playback: dispose immediately, skipping the exit transition.
    ///
    /// Safe from any state; resources are released exactly once and the
    /// completion callback fires only if playback had started.
    pub fn cancel(&mut self) {
        match self.state {
            SequenceState::Playing | SequenceState::Completing => {
                tracing::info!(sequence = %self.name, "cancelled");
                self.dispose(Some(CompletionReason::Cancelled));
            }
            SequenceState::Idle => {
                // never started: release anything claimed, no callback
                self.dispose(None);
            }
            SequenceState::Disposed => {
                tracing::debug!(sequence = %self.name, "cancel() ignored, already disposed");
            }
        }
    }

    /// Consume pending skip/cancel requests from control handles
    fn poll_signals(&mut self) {
        if self.signals.cancel.swap(false, Ordering::Relaxed) {
            self.cancel();
        } else if self.signals.skip.swap(false, Ordering::Relaxed) {
            self.skip();
        }
    }

    fn begin_completing(&mut self, reason: CompletionReason, exit_duration: f64) {
        self.state = SequenceState::Completing;
        self.pending_reason = Some(reason);
        self.exit_remaining = exit_duration.max(0.0);
        if self.exit_remaining == 0.0 {
            let reason = self
                .pending_reason
                .take()
                .unwrap_or(CompletionReason::NaturalEnd);
            self.dispose(Some(reason));
        }
    }

    /// Release everything and fire the completion callback.
    ///
    /// Every exit path (natural end, skip, cancel, drop) funnels through
    /// here; the disposed check makes double disposal impossible.
    fn dispose(&mut self, reason: Option<CompletionReason>) {
        if self.state == SequenceState::Disposed {
            return;
        }
        let started = self.state != SequenceState::Idle;
        self.state = SequenceState::Disposed;

        let failures = self.resources.release_all();
        self.clock.stop();
        self.channels.reset_all();

        if started {
            if let (Some(reason), Some(f)) = (reason, self.on_complete.take()) {
                f(reason);
            }
            tracing::info!(
                sequence = %self.name,
                reason = ?reason,
                failed_releases = failures.len(),
                "cutscene disposed"
            );
        }
    }
}

impl Drop for Sequence {
    fn drop(&mut self) {
        match self.state {
            SequenceState::Playing | SequenceState::Completing => {
                tracing::warn!(sequence = %self.name, "dropped while active, cancelling");
                self.dispose(Some(CompletionReason::Cancelled));
            }
            SequenceState::Idle => {
                self.dispose(None);
            }
            SequenceState::Disposed => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::Channel;
    use crate::clock::{AudioError, AudioHandle};
    use crate::event::{Event, EventKind, EventPayload};
    use crate::timeline::{ExitStyle, ExitTransition};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct Recording {
        lines: Rc<RefCell<Vec<String>>>,
        resets: Rc<RefCell<usize>>,
    }

    impl Channel for Recording {
        fn apply(&mut self, payload: &EventPayload) {
            if let EventPayload::Text { line } = payload {
                self.lines.borrow_mut().push(line.clone());
            }
        }

        fn reset(&mut self) {
            *self.resets.borrow_mut() += 1;
        }
    }

    fn text_timeline(times: &[(f64, &str)], exit: f64) -> Timeline {
        Timeline::with_exit(
            times
                .iter()
                .map(|&(at, line)| {
                    Event::new(
                        at,
                        EventPayload::Text {
                            line: line.to_string(),
                        },
                    )
                })
                .collect(),
            ExitTransition {
                style: ExitStyle::FadeToBlack,
                duration: exit,
            },
        )
    }

    struct Harness {
        sequence: Sequence,
        lines: Rc<RefCell<Vec<String>>>,
        resets: Rc<RefCell<usize>>,
        completions: Rc<RefCell<Vec<CompletionReason>>>,
    }

    fn harness(timeline: Timeline) -> Harness {
        let lines = Rc::new(RefCell::new(Vec::new()));
        let resets = Rc::new(RefCell::new(0));
        let completions = Rc::new(RefCell::new(Vec::new()));

        let mut channels = ChannelRegistry::new();
        channels.register(
            EventKind::Text,
            Box::new(Recording {
                lines: Rc::clone(&lines),
                resets: Rc::clone(&resets),
            }),
        );

        let c = Rc::clone(&completions);
        let sequence = Sequence::new("test", timeline, ClockSource::wall(), channels)
            .with_completion(move |reason| c.borrow_mut().push(reason));

        Harness {
            sequence,
            lines,
            resets,
            completions,
        }
    }

    #[test]
    fn test_scenario_a_natural_run() {
        // Timeline [(0, title), (5, hello), (10, end)], ticks at t=0..=12
        let mut h = harness(text_timeline(&[(0.0, "title"), (5.0, "hello"), (10.0, "end")], 1.0));
        h.sequence.start();
        h.sequence.tick(0.0);
        for _ in 0..12 {
            h.sequence.tick(1.0);
        }

        assert_eq!(*h.lines.borrow(), vec!["title", "hello", "end"]);
        assert_eq!(*h.completions.borrow(), vec![CompletionReason::NaturalEnd]);
        assert_eq!(h.sequence.state(), SequenceState::Disposed);
        assert_eq!(*h.resets.borrow(), 1);
    }

    #[test]
    fn test_scenario_b_skip_suppresses_remaining_effects() {
        let mut h = harness(text_timeline(&[(0.0, "title"), (5.0, "hello"), (10.0, "end")], 1.0));
        h.sequence.start();
        h.sequence.tick(0.0);
        for _ in 0..3 {
            h.sequence.tick(1.0);
        }
        h.sequence.skip();
        // skip exit is short; a couple of frames finish it
        h.sequence.tick(0.25);
        h.sequence.tick(0.25);

        assert_eq!(*h.lines.borrow(), vec!["title"]);
        assert_eq!(*h.completions.borrow(), vec![CompletionReason::Skipped]);
        assert_eq!(h.sequence.state(), SequenceState::Disposed);
    }

    #[test]
    fn test_scenario_c_tick_jump_fires_all_in_order() {
        let mut h = harness(text_timeline(&[(0.0, "title"), (5.0, "hello"), (10.0, "end")], 1.0));
        h.sequence.start();
        h.sequence.tick(4.0);
        assert_eq!(*h.lines.borrow(), vec!["title"]);
        // backgrounded tab resumes: one tick covers t=4 to t=11
        h.sequence.tick(7.0);
        assert_eq!(*h.lines.borrow(), vec!["title", "hello", "end"]);
    }

    #[test]
    fn test_completion_fires_exactly_once_across_paths() {
        let mut h = harness(text_timeline(&[(0.0, "title"), (5.0, "hello")], 0.5));
        h.sequence.start();
        h.sequence.tick(0.0);
        h.sequence.skip();
        h.sequence.skip();
        h.sequence.cancel();
        h.sequence.cancel();
        h.sequence.tick(1.0);

        assert_eq!(*h.completions.borrow(), vec![CompletionReason::Cancelled]);
        assert_eq!(*h.resets.borrow(), 1);
    }

    #[test]
    fn test_skip_is_idempotent() {
        let mut first = harness(text_timeline(&[(0.0, "a"), (5.0, "b")], 1.0));
        first.sequence.start();
        first.sequence.tick(1.0);
        first.sequence.skip();
        first.sequence.tick(0.5);

        let mut second = harness(text_timeline(&[(0.0, "a"), (5.0, "b")], 1.0));
        second.sequence.start();
        second.sequence.tick(1.0);
        second.sequence.skip();
        second.sequence.skip();
        second.sequence.tick(0.5);

        assert_eq!(*first.lines.borrow(), *second.lines.borrow());
        assert_eq!(*first.completions.borrow(), *second.completions.borrow());
    }

    #[test]
    fn test_no_completion_without_start() {
        {
            let mut h = harness(text_timeline(&[(0.0, "a")], 1.0));
            h.sequence.cancel();
            assert!(h.completions.borrow().is_empty());
        }
        // dropping an idle sequence also fires nothing
        let h = harness(text_timeline(&[(0.0, "a")], 1.0));
        let completions = Rc::clone(&h.completions);
        drop(h);
        assert!(completions.borrow().is_empty());
    }

    #[test]
    fn test_double_start_is_logged_noop() {
        let mut h = harness(text_timeline(&[(0.0, "a")], 1.0));
        h.sequence.start();
        h.sequence.start();
        assert_eq!(h.sequence.state(), SequenceState::Playing);
    }

    #[test]
    fn test_drop_while_playing_cancels_and_releases() {
        let h = harness(text_timeline(&[(0.0, "a"), (60.0, "b")], 1.0));
        let completions = Rc::clone(&h.completions);
        let resets = Rc::clone(&h.resets);
        let mut sequence = h.sequence;
        sequence.start();
        sequence.tick(1.0);
        drop(sequence);

        assert_eq!(*completions.borrow(), vec![CompletionReason::Cancelled]);
        assert_eq!(*resets.borrow(), 1);
    }

    #[test]
    fn test_claimed_resources_release_on_skip() {
        let released = Rc::new(Cell::new(false));
        let mut h = harness(text_timeline(&[(0.0, "a"), (9.0, "b")], 1.0));
        let r = Rc::clone(&released);
        h.sequence.claim("tick registration", move || {
            r.set(true);
            Ok(())
        });
        h.sequence.start();
        h.sequence.tick(1.0);
        h.sequence.skip();
        h.sequence.tick(1.0);

        assert!(released.get());
        assert_eq!(h.sequence.state(), SequenceState::Disposed);
    }

    #[test]
    fn test_zero_duration_exit_disposes_synchronously() {
        let mut h = harness(text_timeline(&[(0.0, "a")], 0.0));
        h.sequence.start();
        h.sequence.tick(0.0);
        assert_eq!(h.sequence.state(), SequenceState::Disposed);
        assert_eq!(*h.completions.borrow(), vec![CompletionReason::NaturalEnd]);
    }

    /// Channel that requests a skip through its control handle mid-dispatch
    struct SkippingChannel {
        control: SequenceControl,
        applied: Rc<RefCell<Vec<String>>>,
    }

    impl Channel for SkippingChannel {
        fn apply(&mut self, payload: &EventPayload) {
            if let EventPayload::Text { line } = payload {
                self.applied.borrow_mut().push(line.clone());
            }
            self.control.skip();
        }
    }

    #[test]
    fn test_reentrant_skip_from_channel_callback() {
        let applied = Rc::new(RefCell::new(Vec::new()));
        let completions = Rc::new(RefCell::new(Vec::new()));

        let c = Rc::clone(&completions);
        let mut sequence = Sequence::new(
            "reentrant",
            text_timeline(&[(0.0, "a"), (0.0, "b")], 1.0),
            ClockSource::wall(),
            ChannelRegistry::new(),
        )
        .with_completion(move |reason| c.borrow_mut().push(reason));
        sequence.register_channel(
            EventKind::Text,
            Box::new(SkippingChannel {
                control: sequence.control(),
                applied: Rc::clone(&applied),
            }),
        );

        sequence.start();
        sequence.tick(0.0);
        // first event dispatched, its skip request suppressed the second
        assert_eq!(*applied.borrow(), vec!["a"]);
        sequence.tick(0.5);
        assert_eq!(*completions.borrow(), vec![CompletionReason::Skipped]);
    }

    /// Audio that never reports progress
    struct SilentAudio;

    impl AudioHandle for SilentAudio {
        fn play(&mut self) -> Result<(), AudioError> {
            Ok(())
        }
        fn position(&self) -> f64 {
            0.0
        }
        fn has_ended(&self) -> bool {
            false
        }
        fn stop(&mut self) {}
    }

    #[test]
    fn test_clock_fallback_fires_degraded_exactly_once() {
        let degraded = Rc::new(RefCell::new(0));
        let lines = Rc::new(RefCell::new(Vec::new()));

        let mut channels = ChannelRegistry::new();
        channels.register(
            EventKind::Text,
            Box::new(Recording {
                lines: Rc::clone(&lines),
                resets: Rc::new(RefCell::new(0)),
            }),
        );

        let d = Rc::clone(&degraded);
        let mut sequence = Sequence::new(
            "no-audio",
            text_timeline(&[(0.0, "a"), (2.0, "b")], 0.0),
            ClockSource::media(Box::new(SilentAudio)),
            channels,
        )
        .with_degraded(move || *d.borrow_mut() += 1);

        sequence.start();
        for _ in 0..30 {
            sequence.tick(0.1);
        }

        assert_eq!(*degraded.borrow(), 1);
        assert!(sequence.is_degraded());
        // wall-derived time still drove the timeline to its end
        assert_eq!(*lines.borrow(), vec!["a", "b"]);
        assert_eq!(sequence.state(), SequenceState::Disposed);
    }
}
