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
//! Edge case tests for the step engine
//!
//! Degenerate geometry, extreme parameters and unusual store contents. The
//! step runs every frame, so none of these may panic.

use glam::Vec2;
use particle_sandbox::engine::{self, resolve_collisions};
use particle_sandbox::{Body, BodyStore, SimulationParams};

#[test]
fn test_empty_store_step() {
    let params = SimulationParams::default();
    let mut store: BodyStore<()> = BodyStore::new();
    let report = engine::advance(store.as_mut_slice(), &params);
    assert_eq!(report.integrated, 0);
    assert_eq!(report.collisions.checks, 0);
}

#[test]
fn test_stacked_bodies_do_not_panic() {
    let params = SimulationParams::default();
    let mut store = BodyStore::new();
    for _ in 0..10 {
        store.spawn(Vec2::new(0.2, 0.2), Vec2::ZERO, ());
    }

    let report = engine::advance(store.as_mut_slice(), &params);

    // All pairs coincide and share the same velocity, so nothing can separate them
    assert_eq!(report.collisions.contacts, 45 * 10);
    assert_eq!(report.collisions.coincident_skips, 45 * 10);
    for body in store.iter() {
        assert!(body.is_valid());
    }
}

#[test]
fn test_coincident_pair_separates_once_velocities_differ() {
    let params = SimulationParams {
        gravity: 0.0,
        ..SimulationParams::default()
    };
    let mut store = BodyStore::new();
    store.spawn(Vec2::ZERO, Vec2::new(0.1, 0.0), ());
    store.spawn(Vec2::ZERO, Vec2::new(-0.1, 0.0), ());

    for _ in 0..5 {
        engine::advance(store.as_mut_slice(), &params);
    }

    let a = store.get(0).unwrap().position;
    let b = store.get(1).unwrap().position;
    assert!(a.distance(b) >= params.contact_distance() - 1e-3);
}

#[test]
fn test_nan_body_does_not_panic() {
    let params = SimulationParams::default();
    let mut store = BodyStore::new();
    store.spawn(Vec2::new(f32::NAN, 0.0), Vec2::ZERO, ());
    store.spawn(Vec2::new(0.0, 0.0), Vec2::ZERO, ());

    let report = engine::advance(store.as_mut_slice(), &params);

    assert_eq!(report.integrated, 1);
    assert!(store.get(1).unwrap().is_valid());
}

#[test]
fn test_huge_velocity_is_clamped_to_walls() {
    let params = SimulationParams::default();
    let mut store = BodyStore::new();
    store.spawn(Vec2::ZERO, Vec2::new(1e6, -1e6), ());

    engine::advance(store.as_mut_slice(), &params);

    let body = store.get(0).unwrap();
    assert!((body.position.x - 0.95).abs() < 1e-6);
    assert!((body.position.y - (-0.95)).abs() < 1e-6);
    assert!(body.velocity.x < 0.0);
    assert!(body.velocity.y > 0.0);
}

#[test]
fn test_radius_larger_than_half_domain() {
    let params = SimulationParams {
        radius: 1.0,
        ..SimulationParams::default()
    };
    let mut store = BodyStore::new();
    store.spawn(Vec2::new(0.3, 0.3), Vec2::new(0.1, 0.1), ());
    store.spawn(Vec2::new(-0.3, -0.3), Vec2::ZERO, ());

    for _ in 0..20 {
        engine::advance(store.as_mut_slice(), &params);
    }
    for body in store.iter() {
        assert!(body.is_valid());
    }
}

#[test]
fn test_zero_bounce_damping_kills_normal_velocity() {
    let params = SimulationParams {
        bounce_damping: 0.0,
        gravity: 0.0,
        energy_loss_enabled: false,
        ..SimulationParams::default()
    };
    let mut store = BodyStore::new();
    store.spawn(Vec2::new(0.9, 0.0), Vec2::new(2.0, 0.5), ());

    engine::advance(store.as_mut_slice(), &params);

    let body = store.get(0).unwrap();
    assert_eq!(body.velocity.x, 0.0);
    assert_eq!(body.velocity.y, 0.5);
}

#[test]
fn test_bounce_damping_above_one_adds_energy() {
    let params = SimulationParams {
        bounce_damping: 2.0,
        gravity: 0.0,
        energy_loss_enabled: false,
        ..SimulationParams::default()
    };
    let mut store = BodyStore::new();
    store.spawn(Vec2::new(0.9, 0.0), Vec2::new(1.0, 0.0), ());

    engine::advance(store.as_mut_slice(), &params);

    assert_eq!(store.get(0).unwrap().velocity.x, -2.0);
}

#[test]
fn test_single_iteration_may_leave_overlap() {
    let params = SimulationParams {
        collision_iterations: 1,
        ..SimulationParams::default()
    };
    // Three bodies in a tight row; the middle one is pushed back and forth
    let mut bodies = vec![
        Body::at_rest(Vec2::new(-0.04, 0.0), ()),
        Body::at_rest(Vec2::new(0.0, 0.0), ()),
        Body::at_rest(Vec2::new(0.04, 0.0), ()),
    ];

    let stats = resolve_collisions(&mut bodies, &params);
    assert_eq!(stats.iterations, 1);
    assert!(stats.contacts >= 2);
}

#[test]
fn test_many_bodies_step() {
    let params = SimulationParams {
        radius: 0.01,
        ..SimulationParams::default()
    };
    let mut store: BodyStore<u32> = (0..2100u32)
        .map(|i| {
            let x = (i % 60) as f32 / 30.0 - 0.98;
            let y = (i / 60) as f32 / 30.0 - 0.98;
            Body::new(Vec2::new(x, y), Vec2::new(0.01, -0.01), i)
        })
        .collect();

    let report = engine::advance(store.as_mut_slice(), &params);

    assert_eq!(report.integrated, 2100);
    assert_eq!(store.len(), 2100);
    assert!(store.iter().enumerate().all(|(i, b)| b.tag == i as u32));
}
