//! wgpu render backend for the basic world demo.
//!
//! Draws the sky dome with a gradient shader, then lit meshes with hemisphere
//! and directional light, percentage-closer shadows from the sun and exp2 fog.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Meshes sharing a geometry share one vertex/index buffer.
//! - The shadow pass only draws meshes that cast shadows.

mod frame;
mod gpu;
mod mesh;
mod renderer;
mod shaders;

pub use gpu::GpuError;
pub use renderer::WgpuRenderer;
