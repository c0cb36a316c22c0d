// SPDX-License-Identifier: MIT OR Apache-2.0
//! Fixed-timestep frame driver.
//!
//! Real frame time is accumulated and fed to the sequence in fixed steps,
//! with a cap on steps per frame so a long stall (debugger, suspended
//! laptop) cannot trigger a catch-up spiral. The engine itself handles the
//! resulting time jump by firing every newly due event in one tick.

use reverie_cutscene::{Sequence, SequenceState};
use std::time::{Duration, Instant};

/// Maximum fixed steps consumed per frame
const MAX_STEPS_PER_FRAME: u32 = 8;

/// Drives a sequence at a fixed logical tick rate
pub struct Ticker {
    timestep: f64,
}

impl Ticker {
    /// Create a ticker running at `hz` logical ticks per second
    pub fn new(hz: f64) -> Self {
        Self {
            timestep: 1.0 / hz.max(1.0),
        }
    }

    /// Drive the sequence until it is disposed
    pub fn run(&self, sequence: &mut Sequence) {
        let mut last = Instant::now();
        let mut accumulated = 0.0;

        while sequence.state() != SequenceState::Disposed {
            let now = Instant::now();
            accumulated += now.duration_since(last).as_secs_f64();
            last = now;

            for _ in 0..consume(&mut accumulated, self.timestep) {
                sequence.tick(self.timestep);
                if sequence.state() == SequenceState::Disposed {
                    return;
                }
            }

            std::thread::sleep(Duration::from_secs_f64(self.timestep / 2.0));
        }
    }
}

/// Number of fixed steps covered by the accumulated frame time, capped at
/// `MAX_STEPS_PER_FRAME` (excess time is dropped)
fn consume(accumulated: &mut f64, timestep: f64) -> u32 {
    let mut steps = 0;
    while *accumulated >= timestep {
        *accumulated -= timestep;
        steps += 1;
        if steps >= MAX_STEPS_PER_FRAME {
            *accumulated = 0.0;
            break;
        }
    }
    steps
}
