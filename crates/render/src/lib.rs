//! Rendering Adapter: renderer-agnostic interface plus the camera it draws from.
//!
//! # Invariants
//! - Renderers never mutate the scene.
//! - Resizing changes projection and output size only.

mod camera;
mod config;
mod orbit;
mod renderer;

pub use camera::PerspectiveCamera;
pub use config::{RendererConfig, ShadowFilter, ShadowMapConfig};
pub use orbit::OrbitControls;
pub use renderer::{HeadlessRenderer, RenderError, Renderer, describe_frame};
