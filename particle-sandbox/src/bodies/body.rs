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
//! Body and display tag types
//!
//! A body is a point-mass disk. Every body shares the global radius from
//! [`SimulationParams`](crate::SimulationParams), so the body itself only
//! carries kinematic state plus an opaque tag for the renderer.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Bound the step engine places on body tags
///
/// With the `parallel` feature the per-body phases hand chunks of bodies to
/// Rayon workers, so tags must be `Send`.
#[cfg(feature = "parallel")]
pub trait BodyTag: Send {}

#[cfg(feature = "parallel")]
impl<T: Send> BodyTag for T {}

/// Bound the step engine places on body tags
///
/// Without the `parallel` feature every type qualifies, including `Rc`.
#[cfg(not(feature = "parallel"))]
pub trait BodyTag {}

#[cfg(not(feature = "parallel"))]
impl<T> BodyTag for T {}

/// A disk-shaped particle
///
/// The tag is never read or written by the step engine.
///
/// # Examples
///
/// ```
/// use particle_sandbox::{Body, Color};
/// use glam::Vec2;
///
/// let body = Body::new(Vec2::new(0.25, 0.5), Vec2::ZERO, Color::WHITE);
/// assert!(body.is_valid());
/// assert_eq!(body.speed(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body<T = Color> {
    /// Center in normalized space; the domain spans [-1, 1] on both axes
    pub position: Vec2,
    /// Velocity in normalized units per unit of logical time
    pub velocity: Vec2,
    /// Display attribute carried for the renderer
    pub tag: T,
}

impl<T> Body<T> {
    /// Create a body
    pub fn new(position: Vec2, velocity: Vec2, tag: T) -> Self {
        Body {
            position,
            velocity,
            tag,
        }
    }

    /// Create a body at rest
    pub fn at_rest(position: Vec2, tag: T) -> Self {
        Body::new(position, Vec2::ZERO, tag)
    }

    /// Magnitude of the velocity
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Check that position and velocity are finite
    pub fn is_valid(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Distance between this body's center and `point`
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }
}

/// Linear RGB color, each channel nominally in [0, 1]
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Color {
    /// Opaque white
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Create a color from its channels
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b }
    }

    /// The channels as a vector
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    /// The channels as an array
    pub fn as_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<Vec3> for Color {
    fn from(v: Vec3) -> Self {
        Color::rgb(v.x, v.y, v.z)
    }
}
