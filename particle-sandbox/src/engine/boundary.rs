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
//! Boundary collision against the fixed [-1, 1] box
//!
//! The four walls are checked independently, so a body in a corner is
//! corrected on both axes in the same step. A body whose disk crosses a wall
//! is clamped tangent to it and its normal velocity is reflected and scaled
//! by `-bounce_damping`.

use crate::bodies::{Body, BodyTag};
use crate::SimulationParams;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
use super::integrate::{PARALLEL_CHUNK_SIZE, PARALLEL_THRESHOLD};

/// Lower edge of the domain on both axes
pub const DOMAIN_MIN: f32 = -1.0;

/// Upper edge of the domain on both axes
pub const DOMAIN_MAX: f32 = 1.0;

/// Clamp one body inside the box
///
/// Returns the number of walls the body touched (0 to 4).
#[inline]
pub fn bounce_off_walls<T>(body: &mut Body<T>, radius: f32, bounce_damping: f32) -> u32 {
    let mut contacts = 0;

    if body.position.x - radius < DOMAIN_MIN {
        body.position.x = DOMAIN_MIN + radius;
        body.velocity.x *= -bounce_damping;
        contacts += 1;
    }
    if body.position.x + radius > DOMAIN_MAX {
        body.position.x = DOMAIN_MAX - radius;
        body.velocity.x *= -bounce_damping;
        contacts += 1;
    }
    if body.position.y - radius < DOMAIN_MIN {
        body.position.y = DOMAIN_MIN + radius;
        body.velocity.y *= -bounce_damping;
        contacts += 1;
    }
    if body.position.y + radius > DOMAIN_MAX {
        body.position.y = DOMAIN_MAX - radius;
        body.velocity.y *= -bounce_damping;
        contacts += 1;
    }

    contacts
}

/// Apply wall collisions to every body
///
/// # Returns
///
/// Total number of wall contacts this step
pub fn resolve_boundaries<T: BodyTag>(bodies: &mut [Body<T>], params: &SimulationParams) -> usize {
    resolve_slice(bodies, params.radius, params.bounce_damping)
}

#[cfg(feature = "parallel")]
fn resolve_slice<T: BodyTag>(bodies: &mut [Body<T>], radius: f32, damping: f32) -> usize {
    if bodies.len() < PARALLEL_THRESHOLD {
        return resolve_sequential(bodies, radius, damping);
    }

    bodies
        .par_chunks_mut(PARALLEL_CHUNK_SIZE)
        .map(|chunk| resolve_sequential(chunk, radius, damping))
        .sum()
}

#[cfg(not(feature = "parallel"))]
fn resolve_slice<T: BodyTag>(bodies: &mut [Body<T>], radius: f32, damping: f32) -> usize {
    resolve_sequential(bodies, radius, damping)
}

fn resolve_sequential<T>(bodies: &mut [Body<T>], radius: f32, damping: f32) -> usize {
    bodies
        .iter_mut()
        .map(|body| bounce_off_walls(body, radius, damping) as usize)
        .sum()
}
