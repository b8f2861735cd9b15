use basicworld_common::NodeId;
use basicworld_input::CameraAction;
use basicworld_render::{OrbitControls, PerspectiveCamera, Renderer};
use basicworld_scene::{DemoScene, Scene};
use glam::Vec3;
use rand::Rng;

use crate::frame::{FrameClock, FrameStep};
use crate::schedule::FrameScheduler;

/// Startup camera parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDefaults {
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Placeholder until the first resize event.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub orbit_target: Vec3,
}

impl Default for CameraDefaults {
    fn default() -> Self {
        Self {
            fov: 60.0,
            aspect: 1920.0 / 1080.0,
            near: 1.0,
            far: 20000.0,
            position: Vec3::new(75.0, 20.0, 0.0),
            orbit_target: Vec3::new(0.0, 20.0, 0.0),
        }
    }
}

/// The demo application: scene, camera, orbit controls and the frame loop.
pub struct SceneApp<R: Renderer> {
    renderer: R,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    scene: Scene,
    balls: Vec<NodeId>,
    clock: FrameClock,
    frames: u64,
    render_failures: u64,
}

impl<R: Renderer> SceneApp<R> {
    /// Set up camera, controls and scene around an already created renderer.
    pub fn new(renderer: R, rng: &mut impl Rng) -> Self {
        Self::with_camera(renderer, CameraDefaults::default(), rng)
    }

    pub fn with_camera(renderer: R, defaults: CameraDefaults, rng: &mut impl Rng) -> Self {
        let mut camera =
            PerspectiveCamera::new(defaults.fov, defaults.aspect, defaults.near, defaults.far);
        camera.position = defaults.position;

        let mut controls = OrbitControls::new(defaults.orbit_target);
        controls.update(&mut camera);

        let DemoScene { scene, balls } = DemoScene::build(rng);

        tracing::info!(
            nodes = scene.node_count(),
            balls = balls.len(),
            "scene ready"
        );

        Self {
            renderer,
            camera,
            controls,
            scene,
            balls,
            clock: FrameClock::new(),
            frames: 0,
            render_failures: 0,
        }
    }

    /// Match the camera aspect and renderer output to a new surface size.
    ///
    /// Zero-sized surfaces (e.g. a minimized window) are ignored.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::debug!(width, height, "ignoring zero-sized resize");
            return;
        }
        self.camera.aspect = width as f32 / height as f32;
        self.camera.update_projection_matrix();
        self.renderer.set_size(width, height);
        tracing::debug!(width, height, aspect = self.camera.aspect, "resized");
    }

    /// Frame callback at `timestamp_ms`.
    ///
    /// The next frame is requested before rendering so a failed render never
    /// ends the loop.
    pub fn on_frame(&mut self, timestamp_ms: f64, scheduler: &impl FrameScheduler) -> FrameStep {
        scheduler.request_frame();

        match self.renderer.render(&self.scene, &self.camera) {
            Ok(()) => self.frames += 1,
            Err(e) => {
                self.render_failures += 1;
                tracing::warn!(error = %e, "frame render failed");
            }
        }

        let step = self.clock.advance(timestamp_ms);
        if !step.first {
            self.update(step.step_seconds);
        }
        step
    }

    /// Per-frame simulation hook. Nothing animates yet.
    fn update(&mut self, step_seconds: f64) {
        tracing::trace!(step_seconds, "update");
    }

    /// Route a pointer-derived action to the orbit controls.
    pub fn handle_camera_action(&mut self, action: CameraAction) {
        let (_, viewport_height) = self.renderer.size();
        match action {
            CameraAction::Rotate(delta) => self.controls.rotate(delta, viewport_height),
            CameraAction::Pan(delta) => self.controls.pan(delta, viewport_height, &self.camera),
            CameraAction::Zoom(steps) => self.controls.zoom(steps),
        }
        self.controls.update(&mut self.camera);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Ball handles in creation order.
    pub fn balls(&self) -> &[NodeId] {
        &self.balls
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn render_failures(&self) -> u64 {
        self.render_failures
    }
}
