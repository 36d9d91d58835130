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
//! Pointer input translation
//!
//! The windowing layer reports cursor positions in framebuffer pixels with
//! the origin at the top-left corner. The simulation works in a normalized
//! space spanning [-1, 1] with +y up. [`Viewport`] converts between the two.

use crate::error::{Result, SandboxError};
use glam::Vec2;

/// Pointer buttons the sandbox reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Spawns a body
    Primary,
    /// Removes bodies near the cursor
    Secondary,
    /// Any other button; ignored
    Other(u16),
}

/// A button press at a pixel position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPress {
    /// Which button went down
    pub button: PointerButton,
    /// Cursor position in pixels, origin top-left
    pub pixel: Vec2,
}

impl PointerPress {
    /// Create a press event
    pub fn new(button: PointerButton, x: f32, y: f32) -> Self {
        PointerPress {
            button,
            pixel: Vec2::new(x, y),
        }
    }
}

/// Framebuffer dimensions used to map pointer positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Create a viewport
    ///
    /// Fails if either dimension is zero, negative or not finite.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(SandboxError::Viewport { width, height });
        }
        Ok(Viewport { width, height })
    }

    /// Framebuffer width in pixels
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Framebuffer height in pixels
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }

    /// Update the dimensions after a framebuffer resize
    ///
    /// Invalid sizes (a minimized window reports 0x0) are rejected and the
    /// previous size is kept.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        *self = Viewport::new(width, height)?;
        Ok(())
    }

    /// Map a pixel position to normalized simulation space
    pub fn to_normalized(&self, pixel: Vec2) -> Vec2 {
        Vec2::new(
            (pixel.x / self.width) * 2.0 - 1.0,
            1.0 - (pixel.y / self.height) * 2.0,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: 900.0,
            height: 900.0,
        }
    }
}
