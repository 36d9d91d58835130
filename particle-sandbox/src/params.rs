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
//! Simulation parameters
//!
//! [`SimulationParams`] is a plain configuration struct owned by the driver and
//! passed by reference into every step. All fields are public so a control
//! panel can hold `&mut` handles to them and tune the simulation live; the
//! engine re-reads every field on each step.
//!
//! The engine does not validate parameters. Drivers that accept values from
//! outside (sliders, presets) call [`SimulationParams::validate`] or
//! [`SimulationParams::clamp_to`] to keep them in domain.
//!
//! # Presets
//!
//! Parameters can be loaded from JSON. Missing fields fall back to the
//! defaults, so a preset only needs to name what it changes:
//!
//! ```
//! use particle_sandbox::SimulationParams;
//!
//! let params = SimulationParams::from_json_str(r#"{ "gravity": 0.0, "friction": 1.0 }"#).unwrap();
//! assert_eq!(params.gravity, 0.0);
//! assert_eq!(params.radius, 0.05);
//! ```

use crate::error::{Result, SandboxError};
use serde::{Deserialize, Serialize};

/// Default number of pairwise resolution passes per step
pub const DEFAULT_COLLISION_ITERATIONS: u32 = 10;

/// Default fraction of the overlap each body is pushed back per contact
pub const DEFAULT_POSITION_CORRECTION: f32 = 0.9;

/// Default fraction of the normal relative velocity exchanged per contact
pub const DEFAULT_IMPULSE_FRACTION: f32 = 0.2;

/// Tunable parameters read by the step engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Radius shared by every body, in normalized units
    pub radius: f32,
    /// Vertical acceleration; negative pulls bodies down
    pub gravity: f32,
    /// Logical time advanced by one step
    pub time_step: f32,
    /// Factor applied to the normal velocity on a wall bounce
    pub bounce_damping: f32,
    /// Damping between bodies.
    ///
    /// Not read by collision resolution. Kept so presets and panels that
    /// expose it keep working.
    pub collision_damping: f32,
    /// Per-step velocity multiplier applied when energy loss is enabled
    pub friction: f32,
    /// Enables friction and the collision impulse exchange
    pub energy_loss_enabled: bool,
    /// Driver-side pause gate
    pub paused: bool,
    /// Number of passes over all body pairs per step
    pub collision_iterations: u32,
    /// Positional correction per contact, as a fraction of the overlap
    pub position_correction: f32,
    /// Fraction of the normal relative velocity exchanged per contact
    pub impulse_fraction: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            radius: 0.05,
            gravity: -0.1,
            time_step: 0.09,
            bounce_damping: 1.0,
            collision_damping: 0.9,
            friction: 0.97,
            energy_loss_enabled: true,
            paused: false,
            collision_iterations: DEFAULT_COLLISION_ITERATIONS,
            position_correction: DEFAULT_POSITION_CORRECTION,
            impulse_fraction: DEFAULT_IMPULSE_FRACTION,
        }
    }
}

impl SimulationParams {
    /// Create parameters with the default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON preset, filling missing fields with defaults
    ///
    /// The parsed parameters are validated before being returned.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: SimulationParams = serde_json::from_str(json)?;
        if let Err(err) = params.validate() {
            log::warn!("Rejected parameter preset: {}", err);
            return Err(err);
        }
        Ok(params)
    }

    /// Serialize these parameters as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter against its domain
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("radius", self.radius),
            ("gravity", self.gravity),
            ("time_step", self.time_step),
            ("bounce_damping", self.bounce_damping),
            ("collision_damping", self.collision_damping),
            ("friction", self.friction),
            ("position_correction", self.position_correction),
            ("impulse_fraction", self.impulse_fraction),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(SandboxError::invalid(name, format!("must be finite, got {}", value)));
            }
        }

        if self.radius <= 0.0 {
            return Err(SandboxError::invalid(
                "radius",
                format!("must be positive, got {}", self.radius),
            ));
        }
        if self.time_step <= 0.0 {
            return Err(SandboxError::invalid(
                "time_step",
                format!("must be positive, got {}", self.time_step),
            ));
        }
        if self.bounce_damping < 0.0 {
            return Err(SandboxError::invalid(
                "bounce_damping",
                format!("must be non-negative, got {}", self.bounce_damping),
            ));
        }
        if self.collision_damping < 0.0 {
            return Err(SandboxError::invalid(
                "collision_damping",
                format!("must be non-negative, got {}", self.collision_damping),
            ));
        }
        if self.friction <= 0.0 || self.friction > 1.0 {
            return Err(SandboxError::invalid(
                "friction",
                format!("must be in (0, 1], got {}", self.friction),
            ));
        }
        if self.collision_iterations == 0 {
            return Err(SandboxError::invalid("collision_iterations", "must be at least 1"));
        }
        if self.position_correction < 0.0 {
            return Err(SandboxError::invalid(
                "position_correction",
                format!("must be non-negative, got {}", self.position_correction),
            ));
        }
        if self.impulse_fraction < 0.0 {
            return Err(SandboxError::invalid(
                "impulse_fraction",
                format!("must be non-negative, got {}", self.impulse_fraction),
            ));
        }
        Ok(())
    }

    /// Clamp the panel-tunable parameters into the given slider ranges
    pub fn clamp_to(&mut self, ranges: &ParamRanges) {
        self.radius = ranges.radius.clamp(self.radius);
        self.friction = ranges.friction.clamp(self.friction);
        self.bounce_damping = ranges.bounce_damping.clamp(self.bounce_damping);
        self.gravity = ranges.gravity.clamp(self.gravity);
    }

    /// Two bodies overlap when their centers are closer than this
    pub fn contact_distance(&self) -> f32 {
        2.0 * self.radius
    }
}

/// Closed interval used for a single slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    /// Lower bound
    pub min: f32,
    /// Upper bound
    pub max: f32,
}

impl ParamRange {
    /// Create a range; `min` must not exceed `max`
    pub const fn new(min: f32, max: f32) -> Self {
        ParamRange { min, max }
    }

    /// Clamp a value into the range; NaN maps to `min`
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min;
        }
        value.max(self.min).min(self.max)
    }

    /// Whether `value` lies inside the range
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Slider ranges exposed by the property panel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRanges {
    /// Body radius
    pub radius: ParamRange,
    /// Per-step friction multiplier
    pub friction: ParamRange,
    /// Wall bounce damping
    pub bounce_damping: ParamRange,
    /// Gravity
    pub gravity: ParamRange,
}

impl Default for ParamRanges {
    fn default() -> Self {
        ParamRanges {
            radius: ParamRange::new(0.02, 1.0),
            friction: ParamRange::new(0.1, 0.97),
            bounce_damping: ParamRange::new(0.01, 2.0),
            gravity: ParamRange::new(-10.0, 10.0),
        }
    }
}
