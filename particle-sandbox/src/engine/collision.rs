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
//! Pairwise collision detection and resolution
//!
//! Brute force over all unordered pairs `(i, j)` with `i < j`, repeated a
//! fixed number of times per step. There is no broad phase and no convergence
//! check; dense clusters may keep a small residual overlap.
//!
//! ## Resolution
//!
//! For an overlapping pair with unit normal `n` pointing from `i` to `j`:
//!
//! 1. Positional correction: `c = position_correction * overlap * n`,
//!    `p_i -= c`, `p_j += c`. Each body moves by the full `c`, so one contact
//!    widens the gap by `2 * position_correction * overlap`.
//! 2. Impulse: `s = dot(v_j - v_i, n)`. When energy loss is enabled,
//!    `iv = 2 * impulse_fraction * s * n`, `v_i += iv`, `v_j -= iv`.
//!
//! All bodies are treated as equal mass. Resolving `(i, j)` and then `(i, k)`
//! in the same pass can partly undo the first correction; repeating the pass
//! is what makes the result settle.
//!
//! ## Numerical Stability
//!
//! Coincident centers have no defined normal. Such pairs are skipped rather
//! than divided by zero, and are counted in [`CollisionStats`].

use crate::bodies::Body;
use crate::SimulationParams;
use glam::Vec2;

/// Counters gathered over all resolution passes of one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Pair tests performed
    pub checks: usize,
    /// Overlapping pairs found
    pub contacts: usize,
    /// Overlapping pairs skipped because their centers coincide exactly
    pub coincident_skips: usize,
    /// Passes executed
    pub iterations: u32,
}

impl CollisionStats {
    /// Overlapping pairs that were actually pushed apart
    pub fn resolved(&self) -> usize {
        self.contacts - self.coincident_skips
    }
}

/// Whether two disks of the given radius overlap
#[inline]
pub fn bodies_overlap<T>(a: &Body<T>, b: &Body<T>, radius: f32) -> bool {
    a.position.distance(b.position) < 2.0 * radius
}

/// Separate one overlapping pair and exchange part of their normal velocity
///
/// Returns false, leaving both bodies untouched, when the centers coincide.
pub fn resolve_contact<T>(a: &mut Body<T>, b: &mut Body<T>, params: &SimulationParams) -> bool {
    let delta = b.position - a.position;
    let distance = delta.length();

    if distance == 0.0 {
        return false;
    }

    let normal = delta / distance;
    let overlap = params.contact_distance() - distance;

    let correction = params.position_correction * overlap * normal;
    a.position -= correction;
    b.position += correction;

    if params.energy_loss_enabled {
        let impulse = normal_impulse(a.velocity, b.velocity, normal);
        let exchange = 2.0 * params.impulse_fraction * impulse * normal;
        a.velocity += exchange;
        b.velocity -= exchange;
    }

    true
}

/// Relative velocity of `b` with respect to `a`, projected on `normal`
#[inline]
pub fn normal_impulse(va: Vec2, vb: Vec2, normal: Vec2) -> f32 {
    (vb - va).dot(normal)
}

/// Run `params.collision_iterations` passes over every body pair
pub fn resolve_collisions<T>(bodies: &mut [Body<T>], params: &SimulationParams) -> CollisionStats {
    let mut stats = CollisionStats::default();
    let radius = params.radius;

    for _ in 0..params.collision_iterations {
        for i in 0..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let a = &mut head[i];

            for b in tail.iter_mut() {
                stats.checks += 1;
                if !bodies_overlap(a, b, radius) {
                    continue;
                }

                stats.contacts += 1;
                if !resolve_contact(a, b, params) {
                    stats.coincident_skips += 1;
                }
            }
        }
        stats.iterations += 1;
    }

    if stats.coincident_skips > 0 {
        log::debug!(
            "Skipped {} contacts with coincident centers",
            stats.coincident_skips
        );
    }

    stats
}

/// Smallest center distance over all pairs, or `None` with fewer than two bodies
pub fn min_pair_distance<T>(bodies: &[Body<T>]) -> Option<f32> {
    let mut min: Option<f32> = None;
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let d = a.position.distance(b.position);
            min = Some(min.map_or(d, |m| m.min(d)));
        }
    }
    min
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(energy_loss: bool) -> SimulationParams {
        SimulationParams {
            energy_loss_enabled: energy_loss,
            ..SimulationParams::default()
        }
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Body::at_rest(Vec2::new(0.0, 0.0), ());
        let touching = Body::at_rest(Vec2::new(0.5, 0.0), ());
        let overlapping = Body::at_rest(Vec2::new(0.4999, 0.0), ());

        assert!(!bodies_overlap(&a, &touching, 0.25));
        assert!(bodies_overlap(&a, &overlapping, 0.25));
    }

    #[test]
    fn test_positional_correction() {
        let p = params(false);
        let mut a = Body::at_rest(Vec2::new(0.0, 0.0), ());
        let mut b = Body::at_rest(Vec2::new(0.08, 0.0), ());

        assert!(resolve_contact(&mut a, &mut b, &p));

        // overlap = 0.1 - 0.08 = 0.02, each body moves 0.9 * 0.02
        assert!((a.position.x - (-0.018)).abs() < 1e-6);
        assert!((b.position.x - 0.098).abs() < 1e-6);
        assert_eq!(a.position.y, 0.0);
        assert_eq!(b.position.y, 0.0);
    }

    #[test]
    fn test_correction_is_symmetric() {
        let p = params(true);
        let start_a = Vec2::new(0.1, 0.2);
        let start_b = Vec2::new(0.13, 0.24);
        let mut a = Body::new(start_a, Vec2::new(0.3, -0.1), ());
        let mut b = Body::new(start_b, Vec2::new(-0.2, 0.4), ());
        let momentum_before = a.velocity + b.velocity;

        resolve_contact(&mut a, &mut b, &p);

        let moved_a = a.position - start_a;
        let moved_b = b.position - start_b;
        assert!((moved_a + moved_b).length() < 1e-6);

        // Equal and opposite impulses keep the pair's total velocity
        let momentum_after = a.velocity + b.velocity;
        assert!((momentum_after - momentum_before).length() < 1e-6);
    }

    #[test]
    fn test_impulse_exchange() {
        let p = params(true);
        // Head-on along x, approaching each other
        let mut a = Body::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), ());
        let mut b = Body::new(Vec2::new(0.05, 0.0), Vec2::new(-1.0, 0.0), ());

        resolve_contact(&mut a, &mut b, &p);

        // s = dot(-1 - 1, 1) = -2, iv = 2 * 0.2 * -2 = -0.8
        assert!((a.velocity.x - 0.2).abs() < 1e-6);
        assert!((b.velocity.x - (-0.2)).abs() < 1e-6);
    }

    #[test]
    fn test_no_impulse_without_energy_loss() {
        let p = params(false);
        let mut a = Body::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), ());
        let mut b = Body::new(Vec2::new(0.05, 0.0), Vec2::new(-1.0, 0.0), ());

        resolve_contact(&mut a, &mut b, &p);

        assert_eq!(a.velocity, Vec2::new(1.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(-1.0, 0.0));
        assert!(b.position.x - a.position.x > 0.05);
    }

    #[test]
    fn test_coincident_centers_skipped() {
        let p = params(true);
        let mut a = Body::new(Vec2::new(0.3, 0.3), Vec2::new(1.0, 0.0), ());
        let mut b = Body::new(Vec2::new(0.3, 0.3), Vec2::new(0.0, 1.0), ());

        assert!(!resolve_contact(&mut a, &mut b, &p));
        assert_eq!(a.position, Vec2::new(0.3, 0.3));
        assert_eq!(b.position, Vec2::new(0.3, 0.3));
        assert_eq!(a.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_resolve_collisions_counts() {
        let p = params(true);
        let mut bodies = vec![
            Body::at_rest(Vec2::new(0.0, 0.0), ()),
            Body::at_rest(Vec2::new(0.0, 0.0), ()),
            Body::at_rest(Vec2::new(0.8, 0.8), ()),
        ];

        let stats = resolve_collisions(&mut bodies, &p);

        assert_eq!(stats.iterations, 10);
        assert_eq!(stats.checks, 30);
        assert_eq!(stats.contacts, 10);
        assert_eq!(stats.coincident_skips, 10);
        assert_eq!(stats.resolved(), 0);
    }

    #[test]
    fn test_iterations_are_configurable() {
        let p = SimulationParams {
            collision_iterations: 3,
            ..params(true)
        };
        let mut bodies = vec![Body::at_rest(Vec2::ZERO, ()), Body::at_rest(Vec2::ONE, ())];
        let stats = resolve_collisions(&mut bodies, &p);
        assert_eq!(stats.iterations, 3);
        assert_eq!(stats.checks, 3);
        assert_eq!(stats.contacts, 0);
    }

    #[test]
    fn test_pair_separates() {
        let p = params(true);
        let mut bodies = vec![
            Body::at_rest(Vec2::new(0.0, 0.0), ()),
            Body::at_rest(Vec2::new(0.01, 0.0), ()),
        ];

        resolve_collisions(&mut bodies, &p);

        let d = min_pair_distance(&bodies).unwrap();
        assert!(d >= p.contact_distance() - 1e-4, "distance {}", d);
    }

    #[test]
    fn test_min_pair_distance() {
        assert_eq!(min_pair_distance::<()>(&[]), None);
        assert_eq!(min_pair_distance(&[Body::at_rest(Vec2::ZERO, ())]), None);

        let bodies = vec![
            Body::at_rest(Vec2::new(0.0, 0.0), ()),
            Body::at_rest(Vec2::new(0.3, 0.0), ()),
            Body::at_rest(Vec2::new(0.0, 0.1), ()),
        ];
        assert!((min_pair_distance(&bodies).unwrap() - 0.1).abs() < 1e-6);
    }
}
