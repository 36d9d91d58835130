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
//! Step engine
//!
//! One call to [`advance`] moves the simulation forward by one logical tick.
//! The engine is stateless between calls: everything it needs is the body
//! slice and the parameters, both borrowed for the duration of the step.
//!
//! # Phases
//!
//! 1. **Integration** ([`integrate`]): explicit Euler per body, gravity on the
//!    y axis, optional friction.
//! 2. **Boundary** ([`boundary`]): clamp and reflect against the four walls.
//! 3. **Collisions** ([`collision`]): fixed number of passes over all pairs,
//!    positional correction plus partial impulse exchange.
//!
//! Phases 1 and 2 are per-body independent and may run on Rayon; phase 3 is
//! order-dependent and always sequential.
//!
//! # Timestep
//!
//! The logical `time_step` is not tied to wall-clock time. Calling `advance`
//! once per rendered frame therefore couples simulation speed to frame rate.
//! See [`FixedStepClock`](crate::clock::FixedStepClock) for the opt-in
//! alternative.
//!
//! # Example
//!
//! ```
//! use particle_sandbox::{engine, BodyStore, Color, SimulationParams};
//! use glam::Vec2;
//!
//! let params = SimulationParams { energy_loss_enabled: false, ..SimulationParams::default() };
//! let mut store = BodyStore::new();
//! store.spawn(Vec2::ZERO, Vec2::ZERO, Color::WHITE);
//!
//! engine::advance(store.as_mut_slice(), &params);
//!
//! let body = store.get(0).unwrap();
//! assert!((body.velocity.y + 0.009).abs() < 1e-7);
//! ```

pub mod boundary;
pub mod collision;
pub mod integrate;

pub use boundary::{bounce_off_walls, resolve_boundaries, DOMAIN_MAX, DOMAIN_MIN};
pub use collision::{bodies_overlap, min_pair_distance, resolve_collisions, resolve_contact, CollisionStats};
pub use integrate::{integrate_bodies, integrate_body};

use crate::bodies::{Body, BodyTag};
use crate::SimulationParams;

/// Summary of one step, mostly for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Logical time advanced
    pub time_step: f32,
    /// Bodies with finite state after integration
    pub integrated: usize,
    /// Wall contacts resolved
    pub wall_contacts: usize,
    /// Pairwise collision counters
    pub collisions: CollisionStats,
}

/// Advance all bodies by one tick using `params.time_step`
pub fn advance<T: BodyTag>(bodies: &mut [Body<T>], params: &SimulationParams) -> StepReport {
    advance_with(bodies, params, None)
}

/// Advance all bodies by one tick, optionally overriding the time step
///
/// The override only affects this call; `params` is never modified.
pub fn advance_with<T: BodyTag>(
    bodies: &mut [Body<T>],
    params: &SimulationParams,
    time_step_override: Option<f32>,
) -> StepReport {
    let dt = time_step_override.unwrap_or(params.time_step);

    let integrated = integrate_bodies(bodies, params, dt);
    let wall_contacts = resolve_boundaries(bodies, params);
    let collisions = resolve_collisions(bodies, params);

    let report = StepReport {
        time_step: dt,
        integrated,
        wall_contacts,
        collisions,
    };

    log::trace!(
        "Step dt={} bodies={} walls={} contacts={}",
        dt,
        bodies.len(),
        report.wall_contacts,
        report.collisions.contacts
    );

    report
}

/// Kinetic energy of a single unit-mass body
///
/// KE = 0.5 * v²
pub fn kinetic_energy<T>(body: &Body<T>) -> f32 {
    0.5 * body.velocity.length_squared()
}

/// Total kinetic energy, treating every body as unit mass
pub fn total_kinetic_energy<T>(bodies: &[Body<T>]) -> f32 {
    bodies.iter().map(kinetic_energy).sum()
}
