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
//! Explicit Euler integration
//!
//! Each body is advanced independently:
//! - v.y' = v.y + g*dt (only when gravity is non-zero)
//! - p' = p + v'*dt
//! - v'' = v' * friction (only when energy loss is enabled)
//!
//! There is no sub-stepping. Because bodies do not interact in this phase,
//! large stores are split into chunks and processed with Rayon when the
//! `parallel` feature is enabled; the result is identical to the sequential
//! path.

use crate::bodies::{Body, BodyTag};
use crate::SimulationParams;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Body count at which the per-body phases switch to parallel chunks
pub const PARALLEL_THRESHOLD: usize = 2048;

/// Number of bodies handed to each Rayon task
pub const PARALLEL_CHUNK_SIZE: usize = 512;

/// Advance a single body by `dt`
///
/// Returns false if the body ended up with a non-finite position or velocity.
#[inline]
pub fn integrate_body<T>(body: &mut Body<T>, params: &SimulationParams, dt: f32) -> bool {
    if params.gravity != 0.0 {
        body.velocity.y += params.gravity * dt;
    }

    body.position += body.velocity * dt;

    if params.energy_loss_enabled {
        body.velocity *= params.friction;
    }

    body.is_valid()
}

/// Integrate every body by `dt`
///
/// # Returns
///
/// Number of bodies whose state is still finite after the update. Bodies
/// that became invalid are logged and left as they are.
pub fn integrate_bodies<T: BodyTag>(bodies: &mut [Body<T>], params: &SimulationParams, dt: f32) -> usize {
    let updated = integrate_slice(bodies, params, dt);

    if updated < bodies.len() {
        log::warn!(
            "Integration produced invalid state for {} of {} bodies",
            bodies.len() - updated,
            bodies.len()
        );
    }

    updated
}

#[cfg(feature = "parallel")]
fn integrate_slice<T: BodyTag>(bodies: &mut [Body<T>], params: &SimulationParams, dt: f32) -> usize {
    if bodies.len() < PARALLEL_THRESHOLD {
        return integrate_sequential(bodies, params, dt);
    }

    bodies
        .par_chunks_mut(PARALLEL_CHUNK_SIZE)
        .map(|chunk| integrate_sequential(chunk, params, dt))
        .sum()
}

#[cfg(not(feature = "parallel"))]
fn integrate_slice<T: BodyTag>(bodies: &mut [Body<T>], params: &SimulationParams, dt: f32) -> usize {
    integrate_sequential(bodies, params, dt)
}

fn integrate_sequential<T>(bodies: &mut [Body<T>], params: &SimulationParams, dt: f32) -> usize {
    bodies
        .iter_mut()
        .map(|body| integrate_body(body, params, dt))
        .filter(|&valid| valid)
        .count()
}
