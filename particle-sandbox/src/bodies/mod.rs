//! Body storage
//!
//! This module provides the body type and the store that owns every body in
//! the simulation:
//! - [`Body`]: position, velocity and an opaque display tag
//! - [`Color`]: the default tag type
//! - [`BodyStore`]: spawn, proximity removal, clear and read-only snapshots

mod body;
mod store;

pub use body::{Body, BodyTag, Color};
pub use store::{BodyStore, BodyView};
