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
//! Error types for the fallible edges of the sandbox
//!
//! The step engine itself never fails. Errors only surface where the driver
//! builds or loads configuration, or hands in a viewport to map pointer input.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, SandboxError>;

/// Errors reported by parameter validation, config loading and input mapping
#[derive(Debug, Error)]
pub enum SandboxError {
    /// A simulation parameter is outside its domain
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Field name as it appears in [`SimulationParams`](crate::SimulationParams)
        name: &'static str,
        /// Human readable constraint that was violated
        reason: String,
    },

    /// A parameter preset could not be parsed
    #[error("failed to parse parameter preset: {0}")]
    Config(#[from] serde_json::Error),

    /// The viewport cannot map pointer coordinates (zero or non-finite size)
    #[error("invalid viewport {width}x{height}")]
    Viewport {
        /// Framebuffer width in pixels
        width: f32,
        /// Framebuffer height in pixels
        height: f32,
    },
}

impl SandboxError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SandboxError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
