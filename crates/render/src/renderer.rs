use basicworld_scene::{Material, Scene};
use std::fmt::Write;

use crate::camera::PerspectiveCamera;

/// Per-frame render failure. None of these stop the frame loop.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface lost or outdated; reconfigured for the next frame")]
    SurfaceLost,
    #[error("timed out waiting for the next surface texture")]
    Timeout,
    #[error("out of GPU memory")]
    OutOfMemory,
    #[error("render target has zero area")]
    ZeroSized,
    #[error("render failed: {0}")]
    Other(String),
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer draws a scene as seen from a camera into an output of a given
/// size. It never mutates the scene.
pub trait Renderer {
    /// Draw one frame.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError>;

    /// Resize the output buffer, in physical pixels.
    fn set_size(&mut self, width: u32, height: u32);

    /// Current output size in physical pixels.
    fn size(&self) -> (u32, u32);
}

/// Human-readable summary of what a frame would draw.
pub fn describe_frame(scene: &Scene, camera: &PerspectiveCamera, size: (u32, u32)) -> String {
    let mut lit = 0;
    let mut sky = 0;
    let mut casters = 0;
    for (_, mesh) in scene.meshes() {
        match mesh.material {
            Material::SkyGradient(_) => sky += 1,
            _ => lit += 1,
        }
        if mesh.cast_shadow {
            casters += 1;
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "=== Frame {}x{} ===", size.0, size.1);
    let _ = writeln!(
        out,
        "Nodes: {} (lit meshes {lit}, sky {sky}, shadow casters {casters})",
        scene.node_count()
    );
    let _ = writeln!(
        out,
        "Lights: directional {} hemisphere {}",
        scene.directional_lights().count(),
        scene.hemisphere_lights().count()
    );
    let p = camera.position;
    let t = camera.target;
    let _ = writeln!(
        out,
        "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.3}",
        p.x, p.y, p.z, t.x, t.y, t.z, camera.fov, camera.aspect
    );
    out
}

/// Renderer without a GPU: tracks size and frame count and keeps a text
/// description of the last frame.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    width: u32,
    height: u32,
    frames: u64,
    last_frame: String,
}

impl HeadlessRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> &str {
        &self.last_frame
    }
}

impl Renderer for HeadlessRenderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        self.last_frame = describe_frame(scene, camera, (self.width, self.height));
        self.frames += 1;
        tracing::trace!(frame = self.frames, "headless frame");
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        tracing::debug!(width, height, "headless output resized");
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
