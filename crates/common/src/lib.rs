//! Shared value types used by the scene graph and the renderers.

mod color;
mod types;

pub use color::Color;
pub use types::{NodeId, Transform};
