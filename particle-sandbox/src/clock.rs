// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Fixed-rate stepping decoupled from frame rate
//!
//! By default the sandbox steps once per frame, so simulation speed follows
//! the frame rate. A [`FixedStepClock`] instead converts elapsed wall time
//! into a whole number of logical steps, carrying the remainder to the next
//! frame. This changes observable dynamics and is therefore opt-in.

use std::time::Duration;

/// Default cap on steps run for a single frame
pub const DEFAULT_MAX_STEPS_PER_FRAME: u32 = 8;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Accumulates wall time and hands out fixed steps
#[derive(Debug, Clone, PartialEq)]
pub struct FixedStepClock {
    /// Wall-clock time that corresponds to one logical `time_step`
    step: Duration,
    accumulator: Duration,
    max_steps_per_frame: u32,
    dropped_steps: u64,
}

impl FixedStepClock {
    /// Create a clock running `steps_per_second` logical steps per wall second
    ///
    /// # Panics
    ///
    /// Panics if `steps_per_second` is non-positive, NaN, or infinite.
    pub fn new(steps_per_second: f64) -> Self {
        assert!(
            steps_per_second > 0.0 && steps_per_second.is_finite(),
            "Step rate must be positive and finite"
        );
        FixedStepClock {
            step: Duration::from_secs_f64(1.0 / steps_per_second).max(Duration::from_nanos(1)),
            accumulator: Duration::ZERO,
            max_steps_per_frame: DEFAULT_MAX_STEPS_PER_FRAME,
            dropped_steps: 0,
        }
    }

    /// Limit how many steps a single frame may run; at least one
    pub fn with_max_steps_per_frame(mut self, max_steps: u32) -> Self {
        self.max_steps_per_frame = max_steps.max(1);
        self
    }

    /// Add elapsed wall time and return how many steps are due
    ///
    /// Steps beyond the per-frame cap are discarded so a long stall does not
    /// snowball into ever longer frames.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        self.accumulator = self.accumulator.saturating_add(elapsed);

        let step_nanos = self.step.as_nanos();
        let acc_nanos = self.accumulator.as_nanos();
        let due = acc_nanos / step_nanos;
        let rest = acc_nanos % step_nanos;
        self.accumulator = Duration::new((rest / NANOS_PER_SEC) as u64, (rest % NANOS_PER_SEC) as u32);

        let cap = u128::from(self.max_steps_per_frame);
        if due > cap {
            let dropped = u64::try_from(due - cap).unwrap_or(u64::MAX);
            self.dropped_steps = self.dropped_steps.saturating_add(dropped);
            log::debug!("Dropping {} physics steps after a long frame", dropped);
            return self.max_steps_per_frame;
        }
        due as u32
    }

    /// Fraction of the next step already accumulated, in [0, 1)
    pub fn alpha(&self) -> f64 {
        self.accumulator.as_secs_f64() / self.step.as_secs_f64()
    }

    /// Total steps discarded by the per-frame cap
    pub fn dropped_steps(&self) -> u64 {
        self.dropped_steps
    }

    /// Forget any accumulated time, e.g. after unpausing
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

impl Default for FixedStepClock {
    fn default() -> Self {
        FixedStepClock::new(60.0)
    }
}
