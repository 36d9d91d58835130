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
//! Spawn policy for pointer-created bodies
//!
//! The random source is always passed in, so tests and replays can use a
//! seeded generator:
//!
//! ```
//! use particle_sandbox::spawn::SpawnPolicy;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let policy = SpawnPolicy::default();
//! let mut rng = StdRng::seed_from_u64(7);
//! let velocity = policy.sample_velocity(&mut rng);
//! assert!(velocity.length() <= 0.35 + 1e-6);
//! assert!(velocity.y >= 0.0);
//! ```

use crate::bodies::{Body, Color};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::PI;

/// Upper bound of the sampled spawn speed
pub const DEFAULT_MAX_SPEED: f32 = 0.35;

/// Upper bound of the sampled launch angle; spawned bodies head upward or sideways
pub const DEFAULT_MAX_ANGLE: f32 = PI;

/// How a spawned body's initial velocity and color are chosen
///
/// Speed is uniform in `[0, max_speed]`, direction is uniform in
/// `[0, max_angle]` measured counter-clockwise from +x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    max_speed: f32,
    max_angle: f32,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy {
            max_speed: DEFAULT_MAX_SPEED,
            max_angle: DEFAULT_MAX_ANGLE,
        }
    }
}

impl SpawnPolicy {
    /// Create a policy with custom bounds
    ///
    /// # Panics
    ///
    /// Panics if either bound is negative or not finite.
    pub fn new(max_speed: f32, max_angle: f32) -> Self {
        assert!(
            max_speed >= 0.0 && max_speed.is_finite(),
            "Spawn speed bound must be non-negative and finite"
        );
        assert!(
            max_angle >= 0.0 && max_angle.is_finite(),
            "Spawn angle bound must be non-negative and finite"
        );
        SpawnPolicy { max_speed, max_angle }
    }

    /// A policy that spawns every body at rest
    pub fn at_rest() -> Self {
        SpawnPolicy::new(0.0, 0.0)
    }

    /// Largest initial speed
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Largest launch angle in radians
    pub fn max_angle(&self) -> f32 {
        self.max_angle
    }

    /// Sample an initial velocity
    pub fn sample_velocity<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let speed = rng.gen_range(0.0..=self.max_speed);
        let angle = rng.gen_range(0.0..=self.max_angle);
        Vec2::new(speed * angle.cos(), speed * angle.sin())
    }

    /// Sample a display color, each channel uniform in `[0, 1]`
    pub fn sample_color<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        Color::rgb(
            rng.gen_range(0.0..=1.0),
            rng.gen_range(0.0..=1.0),
            rng.gen_range(0.0..=1.0),
        )
    }

    /// Build a body at `position` with a sampled color and velocity
    ///
    /// The color is drawn before the velocity.
    pub fn spawn_at<R: Rng + ?Sized>(&self, position: Vec2, rng: &mut R) -> Body<Color> {
        let color = self.sample_color(rng);
        let velocity = self.sample_velocity(rng);
        Body::new(position, velocity, color)
    }
}
