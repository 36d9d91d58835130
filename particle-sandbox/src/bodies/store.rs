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
//! Body store
//!
//! The store is the central container for simulation state. It is a dense,
//! ordered array of bodies: spawning appends, removal is by spatial proximity
//! rather than by handle, and the step engine works directly on the
//! contiguous slice.

use crate::bodies::{Body, Color};
use glam::Vec2;

/// Read-only view of one body, handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyView<'a, T> {
    /// Center in normalized space
    pub position: Vec2,
    /// Display tag
    pub tag: &'a T,
}

/// Ordered, growable collection of bodies
///
/// Bodies have no identity beyond their index, and indices are not stable
/// across [`remove_near`](BodyStore::remove_near).
#[derive(Debug, Clone, PartialEq)]
pub struct BodyStore<T = Color> {
    bodies: Vec<Body<T>>,
}

impl<T> BodyStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        BodyStore { bodies: Vec::new() }
    }

    /// Create an empty store with room for `capacity` bodies
    pub fn with_capacity(capacity: usize) -> Self {
        BodyStore {
            bodies: Vec::with_capacity(capacity),
        }
    }

    /// Append a body
    ///
    /// The position is not validated; bodies spawned outside the domain are
    /// pulled back in by the next step's boundary pass.
    pub fn spawn(&mut self, position: Vec2, velocity: Vec2, tag: T) {
        self.bodies.push(Body::new(position, velocity, tag));
    }

    /// Append an already constructed body
    pub fn push(&mut self, body: Body<T>) {
        self.bodies.push(body);
    }

    /// Remove every body whose center is strictly closer than `threshold` to `point`
    ///
    /// Returns the number of bodies removed.
    pub fn remove_near(&mut self, point: Vec2, threshold: f32) -> usize {
        let before = self.bodies.len();
        self.bodies.retain(|body| !(body.distance_to(point) < threshold));
        let removed = before - self.bodies.len();
        if removed > 0 {
            log::debug!(
                "Removed {} bodies within {} of ({:.3}, {:.3}), {} remain",
                removed,
                threshold,
                point.x,
                point.y,
                self.bodies.len()
            );
        }
        removed
    }

    /// Remove all bodies
    pub fn clear(&mut self) {
        log::debug!("Clearing {} bodies", self.bodies.len());
        self.bodies.clear();
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the store holds no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Get a body by index
    pub fn get(&self, index: usize) -> Option<&Body<T>> {
        self.bodies.get(index)
    }

    /// Iterate over all bodies in order
    pub fn iter(&self) -> std::slice::Iter<'_, Body<T>> {
        self.bodies.iter()
    }

    /// All bodies as a slice
    pub fn as_slice(&self) -> &[Body<T>] {
        &self.bodies
    }

    /// All bodies as a mutable slice, for the step engine
    pub fn as_mut_slice(&mut self) -> &mut [Body<T>] {
        &mut self.bodies
    }

    /// Positions and tags for drawing
    pub fn snapshot(&self) -> impl Iterator<Item = BodyView<'_, T>> + '_ {
        self.bodies.iter().map(|body| BodyView {
            position: body.position,
            tag: &body.tag,
        })
    }
}

impl<T> Default for BodyStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<Body<T>> for BodyStore<T> {
    fn from_iter<I: IntoIterator<Item = Body<T>>>(iter: I) -> Self {
        BodyStore {
            bodies: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<Body<T>> for BodyStore<T> {
    fn extend<I: IntoIterator<Item = Body<T>>>(&mut self, iter: I) {
        self.bodies.extend(iter);
    }
}

impl<'a, T> IntoIterator for &'a BodyStore<T> {
    type Item = &'a Body<T>;
    type IntoIter = std::slice::Iter<'a, Body<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
