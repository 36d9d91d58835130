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
//! Frame driver
//!
//! [`Sandbox`] is what a window/UI loop talks to. It owns the body store, the
//! parameters, the spawn policy and the random source, and exposes the
//! operations a frame needs:
//!
//! - translate pointer presses into spawn / remove-near
//! - step once per frame unless paused ([`Sandbox::tick`])
//! - hand out `&mut` parameters to a property panel
//! - produce draw instances for the renderer
//!
//! All of it runs on the caller's thread; `&mut self` guarantees that input
//! handling and stepping never overlap.
//!
//! # Example
//!
//! ```
//! use particle_sandbox::input::{PointerButton, PointerPress};
//! use particle_sandbox::Sandbox;
//!
//! let mut sandbox = Sandbox::with_seed(42);
//! sandbox.handle_pointer(PointerPress::new(PointerButton::Primary, 450.0, 450.0));
//! assert_eq!(sandbox.bodies().len(), 1);
//!
//! sandbox.params_mut().paused = true;
//! assert!(sandbox.tick().is_none());
//! ```

use crate::bodies::{BodyStore, Color};
use crate::clock::FixedStepClock;
use crate::engine::{self, StepReport};
use crate::error::Result;
use crate::input::{PointerButton, PointerPress, Viewport};
use crate::params::{ParamRanges, SimulationParams};
use crate::render::{self, DrawInstance};
use crate::spawn::SpawnPolicy;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// What a pointer press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// A body was spawned at the cursor
    Spawned,
    /// This many bodies were removed near the cursor
    Removed(usize),
    /// The button has no binding
    Ignored,
}

/// Driver-side owner of simulation state
pub struct Sandbox<R: Rng = StdRng> {
    bodies: BodyStore<Color>,
    params: SimulationParams,
    ranges: ParamRanges,
    spawn_policy: SpawnPolicy,
    viewport: Viewport,
    rng: R,
    ticks: u64,
}

impl Sandbox<StdRng> {
    /// Create a sandbox with a deterministic random source
    pub fn with_seed(seed: u64) -> Self {
        Sandbox::new(StdRng::seed_from_u64(seed))
    }

    /// Create a sandbox seeded from the operating system
    pub fn from_entropy() -> Self {
        Sandbox::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Sandbox<R> {
    /// Create a sandbox with default parameters and the given random source
    pub fn new(rng: R) -> Self {
        Sandbox {
            bodies: BodyStore::new(),
            params: SimulationParams::default(),
            ranges: ParamRanges::default(),
            spawn_policy: SpawnPolicy::default(),
            viewport: Viewport::default(),
            rng,
            ticks: 0,
        }
    }

    /// Replace the parameters, validating them first
    pub fn with_params(mut self, params: SimulationParams) -> Result<Self> {
        params.validate()?;
        self.params = params;
        Ok(self)
    }

    /// Replace the spawn policy
    pub fn with_spawn_policy(mut self, policy: SpawnPolicy) -> Self {
        self.spawn_policy = policy;
        self
    }

    /// Replace the viewport used for pointer mapping and draw scaling
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Current parameters
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Mutable parameters for live tuning
    pub fn params_mut(&mut self) -> &mut SimulationParams {
        &mut self.params
    }

    /// Slider ranges used by [`clamp_params`](Sandbox::clamp_params)
    pub fn ranges(&self) -> &ParamRanges {
        &self.ranges
    }

    /// Pull panel-tunable parameters back into their slider ranges
    pub fn clamp_params(&mut self) {
        self.params.clamp_to(&self.ranges);
    }

    /// Read-only access to the bodies
    pub fn bodies(&self) -> &BodyStore<Color> {
        &self.bodies
    }

    /// The viewport
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Number of steps executed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether stepping is gated off
    pub fn is_paused(&self) -> bool {
        self.params.paused
    }

    /// Set the pause gate
    pub fn set_paused(&mut self, paused: bool) {
        self.params.paused = paused;
    }

    /// Append a body
    pub fn spawn(&mut self, position: Vec2, velocity: Vec2, tag: Color) {
        self.bodies.spawn(position, velocity, tag);
    }

    /// Append a body with policy-chosen velocity and color
    pub fn spawn_random(&mut self, position: Vec2) {
        let body = self.spawn_policy.spawn_at(position, &mut self.rng);
        log::debug!(
            "Spawned body at ({:.3}, {:.3}) with speed {:.3}",
            position.x,
            position.y,
            body.speed()
        );
        self.bodies.push(body);
    }

    /// Remove every body strictly within `threshold` of `point`
    pub fn remove_near(&mut self, point: Vec2, threshold: f32) -> usize {
        self.bodies.remove_near(point, threshold)
    }

    /// Remove all bodies
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Apply a pointer press
    ///
    /// Primary spawns at the cursor; secondary removes bodies within one
    /// radius of it.
    pub fn handle_pointer(&mut self, press: PointerPress) -> PointerOutcome {
        let point = self.viewport.to_normalized(press.pixel);
        match press.button {
            PointerButton::Primary => {
                self.spawn_random(point);
                PointerOutcome::Spawned
            }
            PointerButton::Secondary => {
                let radius = self.params.radius;
                PointerOutcome::Removed(self.remove_near(point, radius))
            }
            PointerButton::Other(_) => PointerOutcome::Ignored,
        }
    }

    /// Advance one tick regardless of the pause gate
    pub fn advance(&mut self, time_step_override: Option<f32>) -> StepReport {
        self.ticks += 1;
        engine::advance_with(self.bodies.as_mut_slice(), &self.params, time_step_override)
    }

    /// Frame entry point: advance once unless paused
    pub fn tick(&mut self) -> Option<StepReport> {
        if self.params.paused {
            return None;
        }
        Some(self.advance(None))
    }

    /// Frame entry point for fixed-rate stepping
    ///
    /// Runs as many steps as `clock` says are due for `elapsed`. While paused
    /// no time is accumulated. Returns the number of steps run.
    pub fn tick_elapsed(&mut self, clock: &mut FixedStepClock, elapsed: Duration) -> u32 {
        if self.params.paused {
            clock.reset();
            return 0;
        }
        let steps = clock.accumulate(elapsed);
        for _ in 0..steps {
            self.advance(None);
        }
        steps
    }

    /// Track a framebuffer resize
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.viewport.resize(width, height)
    }

    /// Per-body draw data for the current frame
    pub fn draw_instances(&self) -> Vec<DrawInstance> {
        render::build_instances(&self.bodies, self.params.radius, self.viewport.aspect_ratio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_spawns_at_cursor() {
        let mut sandbox = Sandbox::with_seed(1);
        let outcome = sandbox.handle_pointer(PointerPress::new(PointerButton::Primary, 675.0, 225.0));

        assert_eq!(outcome, PointerOutcome::Spawned);
        let body = sandbox.bodies().get(0).unwrap();
        assert!((body.position.x - 0.5).abs() < 1e-6);
        assert!((body.position.y - 0.5).abs() < 1e-6);
        assert!(body.speed() <= 0.35 + 1e-6);
    }

    #[test]
    fn test_secondary_removes_within_radius() {
        let mut sandbox = Sandbox::with_seed(1);
        sandbox.spawn(Vec2::new(0.0, 0.0), Vec2::ZERO, Color::WHITE);
        sandbox.spawn(Vec2::new(0.5, 0.5), Vec2::ZERO, Color::WHITE);

        let outcome = sandbox.handle_pointer(PointerPress::new(PointerButton::Secondary, 450.0, 450.0));

        assert_eq!(outcome, PointerOutcome::Removed(1));
        assert_eq!(sandbox.bodies().len(), 1);
        assert_eq!(sandbox.bodies().get(0).unwrap().position, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_primary_click_with_custom_policy() {
        let mut sandbox = Sandbox::with_seed(1).with_spawn_policy(SpawnPolicy::new(0.05, 0.0));

        for _ in 0..20 {
            let outcome = sandbox.handle_pointer(PointerPress::new(PointerButton::Primary, 450.0, 450.0));
            assert_eq!(outcome, PointerOutcome::Spawned);
        }

        for body in sandbox.bodies().iter() {
            assert!(body.speed() <= 0.05 + 1e-6);
            assert_eq!(body.velocity.y, 0.0);
        }
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut sandbox = Sandbox::with_seed(1);
        let outcome = sandbox.handle_pointer(PointerPress::new(PointerButton::Other(3), 10.0, 10.0));
        assert_eq!(outcome, PointerOutcome::Ignored);
        assert!(sandbox.bodies().is_empty());
    }

    #[test]
    fn test_pause_gate() {
        let mut sandbox = Sandbox::with_seed(7);
        sandbox.spawn(Vec2::new(0.1, 0.2), Vec2::new(0.3, 0.1), Color::WHITE);
        sandbox.set_paused(true);

        let before = sandbox.bodies().clone();
        for _ in 0..50 {
            assert!(sandbox.tick().is_none());
        }
        assert_eq!(sandbox.bodies(), &before);
        assert_eq!(sandbox.ticks(), 0);

        sandbox.set_paused(false);
        assert!(sandbox.tick().is_some());
        assert_ne!(sandbox.bodies(), &before);
    }

    #[test]
    fn test_tick_elapsed_uses_clock() {
        let mut sandbox = Sandbox::with_seed(7);
        let mut clock = FixedStepClock::new(100.0);

        assert_eq!(sandbox.tick_elapsed(&mut clock, Duration::from_millis(50)), 5);
        assert_eq!(sandbox.ticks(), 5);

        sandbox.set_paused(true);
        assert_eq!(sandbox.tick_elapsed(&mut clock, Duration::from_millis(50)), 0);
        assert_eq!(sandbox.ticks(), 5);
    }

    #[test]
    fn test_with_params_validates() {
        let bad = SimulationParams {
            radius: 0.0,
            ..SimulationParams::default()
        };
        assert!(Sandbox::with_seed(0).with_params(bad).is_err());
    }

    #[test]
    fn test_clamp_params() {
        let mut sandbox = Sandbox::with_seed(0);
        sandbox.params_mut().gravity = 100.0;
        sandbox.clamp_params();
        assert_eq!(sandbox.params().gravity, 10.0);
    }

    #[test]
    fn test_draw_instances_follow_aspect() {
        let mut sandbox = Sandbox::with_seed(0);
        sandbox.resize(1800.0, 900.0).unwrap();
        sandbox.spawn(Vec2::ZERO, Vec2::ZERO, Color::WHITE);

        let instances = sandbox.draw_instances();
        assert_eq!(instances.len(), 1);
        assert!((instances[0].scale[0] - 0.1).abs() < 1e-6);
        assert!((instances[0].scale[1] - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_clear() {
        let mut sandbox = Sandbox::with_seed(0);
        for i in 0..20 {
            sandbox.spawn_random(Vec2::new(-0.9 + 0.09 * i as f32, 0.0));
        }
        sandbox.clear();
        assert!(sandbox.bodies().is_empty());
    }
}
