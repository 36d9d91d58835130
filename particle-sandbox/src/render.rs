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
//! Draw data for an external renderer
//!
//! The crate does not render. It produces plain `#[repr(C)]` data that a GPU
//! backend can upload as-is: one unit-circle triangle fan shared by every
//! body, and one instance per body carrying center, scale and color.

use crate::bodies::{BodyStore, Color};
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::f32::consts::TAU;

/// Default number of rim segments in the circle mesh
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 100;

/// Per-body instance data
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    /// Center in normalized space
    pub center: [f32; 2],
    /// Scale applied to the unit circle
    pub scale: [f32; 2],
    /// Fill color
    pub color: [f32; 3],
}

/// Vertices of a unit-circle triangle fan
///
/// The first vertex is the center, followed by `segments + 1` rim points so
/// the fan closes on itself. The result has `segments + 2` vertices.
pub fn circle_fan(segments: u32) -> Vec<[f32; 2]> {
    let segments = segments.max(3);
    let step = TAU / segments as f32;

    let mut vertices = Vec::with_capacity(segments as usize + 2);
    vertices.push([0.0, 0.0]);
    for i in 0..=segments {
        let angle = i as f32 * step;
        vertices.push([angle.cos(), angle.sin()]);
    }
    vertices
}

/// Scale that maps the unit circle to a body disk
///
/// The x axis is stretched by the viewport aspect ratio.
pub fn instance_scale(radius: f32, aspect_ratio: f32) -> Vec2 {
    Vec2::new(radius * aspect_ratio, radius)
}

/// Build one instance per body
pub fn build_instances(store: &BodyStore<Color>, radius: f32, aspect_ratio: f32) -> Vec<DrawInstance> {
    let scale = instance_scale(radius, aspect_ratio).to_array();
    store
        .snapshot()
        .map(|view| DrawInstance {
            center: view.position.to_array(),
            scale,
            color: view.tag.as_array(),
        })
        .collect()
}
