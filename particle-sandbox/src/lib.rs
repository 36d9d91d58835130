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
//! # Particle Sandbox
//!
//! The simulation kernel of an interactive 2D particle sandbox: disks fall
//! under gravity, bounce off the walls of a fixed `[-1, 1]²` box, and collide
//! with each other.
//!
//! ## Features
//!
//! - **Body Store**: dense, ordered storage with proximity-based removal
//! - **Step Engine**: explicit Euler integration, wall bounces and a fixed
//!   number of brute-force pairwise collision passes
//! - **Explicit Parameters**: no global state; a [`SimulationParams`] value is
//!   passed into every step and can be tuned live
//! - **Driver Contracts**: pointer mapping, seeded spawn policy, pause gate and
//!   draw data for an external window/renderer
//! - **Parallelization**: optional Rayon support for the per-body phases
//!
//! ## Example
//!
//! ```rust
//! use particle_sandbox::{engine, BodyStore, Color, SimulationParams};
//! use glam::Vec2;
//!
//! let params = SimulationParams::default();
//! let mut store = BodyStore::new();
//! store.spawn(Vec2::new(0.0, 0.5), Vec2::new(0.1, 0.0), Color::WHITE);
//! store.spawn(Vec2::new(0.05, 0.5), Vec2::ZERO, Color::WHITE);
//!
//! for _ in 0..100 {
//!     engine::advance(store.as_mut_slice(), &params);
//! }
//!
//! assert_eq!(store.len(), 2);
//! assert!(store.iter().all(|body| body.is_valid()));
//! ```

#![warn(missing_docs)]

/// Body type and body store
pub mod bodies;

/// Per-tick simulation step
pub mod engine;

/// Simulation parameters and slider ranges
pub mod params;

/// Error types
pub mod error;

/// Spawn velocity and color policy
pub mod spawn;

/// Pointer input mapping
pub mod input;

/// Draw data for an external renderer
pub mod render;

/// Fixed-rate stepping
pub mod clock;

/// Frame driver
pub mod sandbox;

pub use bodies::{Body, BodyStore, BodyTag, Color};
pub use engine::{advance, advance_with, StepReport};
pub use error::{Result, SandboxError};
pub use params::{ParamRanges, SimulationParams};
pub use sandbox::Sandbox;
